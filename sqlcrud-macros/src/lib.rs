use convert_case::Case;
use convert_case::Casing;
use darling::FromDeriveInput;
use darling::FromField;
use proc_macro2::Ident;
use proc_macro2::TokenStream as TokenStream2;
use quote::format_ident;
use quote::quote;
use syn::DeriveInput;
use syn::Type;

#[derive(Debug, FromField)]
#[darling(attributes(sqlcrud))]
struct FieldReceiver {
    pub ident: Option<Ident>,
    pub ty:    Type,

    #[darling(default)]
    pub column_name: Option<String>,

    #[darling(default)]
    pub updatable: bool,

    #[darling(default)]
    pub auto_increment: bool,
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(sqlcrud), supports(struct_named))]
struct RecordReceiver {
    pub ident: Ident,
    pub data:  darling::ast::Data<(), FieldReceiver>,

    #[darling(default)]
    pub table_name: Option<String>,

    #[darling(default)]
    pub updatable: bool,
}

#[derive(Debug)]
struct FieldInfo {
    pub field_name:        Ident,
    pub variant_name:      Ident,
    pub column_name:       Option<String>,
    pub field_type:        TokenStream2,
    pub is_updatable:      bool,
    pub is_auto_increment: bool,
}

#[derive(Debug)]
struct RecordInfo {
    pub struct_name: Ident,
    pub table_name:  Option<String>,
    pub updatable:   bool,
    pub fields:      Vec<FieldInfo>,
}

impl FieldReceiver {
    pub fn to_field_info(self) -> FieldInfo {
        let field_name = self.ident.expect("Expected named field");
        let variant_name = to_pascal_case(&field_name);
        let field_type = rust_type_to_field_type(&self.ty);

        FieldInfo {
            field_name,
            variant_name,
            column_name: self.column_name,
            field_type,
            is_updatable: self.updatable,
            is_auto_increment: self.auto_increment,
        }
    }
}

impl RecordReceiver {
    pub fn to_record_info(self) -> RecordInfo {
        let fields =
            self.data.take_struct().expect("Expected struct").fields.into_iter().map(|f| f.to_field_info()).collect();

        RecordInfo { struct_name: self.ident, table_name: self.table_name, updatable: self.updatable, fields }
    }
}

/// Derives `sqlcrud::SqlRecord` for a named-field struct, along with a
/// field enum (`<Struct>Field`) usable as typed field tokens in fragment
/// requests. The derive is purely declarative: it emits the
/// `TableMapping`, and every mapping invariant is checked when the
/// registry validates it.
#[proc_macro_derive(SqlRecord, attributes(sqlcrud))]
pub fn derive_sql_record(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    let receiver = match RecordReceiver::from_derive_input(&input) {
        Ok(r) => r,
        Err(e) => return e.write_errors().into(),
    };

    let record_info = receiver.to_record_info();

    let expanded = impl_sql_record(&record_info);
    proc_macro::TokenStream::from(expanded)
}

fn impl_sql_record(record_info: &RecordInfo) -> TokenStream2 {
    let name = &record_info.struct_name;
    let field_enum_name = format_ident!("{}Field", name);
    let type_name = name.to_string();

    let field_variants: Vec<_> = record_info
        .fields
        .iter()
        .map(|f| {
            let variant_name = &f.variant_name;
            quote! { #variant_name }
        })
        .collect();

    let field_name_arms: Vec<_> = record_info
        .fields
        .iter()
        .map(|f| {
            let variant_name = &f.variant_name;
            let field_name = f.field_name.to_string();
            quote! { Self::#variant_name => #field_name }
        })
        .collect();

    let table_name_call = match &record_info.table_name {
        Some(table_name) => quote! { .table_name(#table_name) },
        None => quote! {},
    };

    let updatable_call = if record_info.updatable {
        quote! { .updatable() }
    } else {
        quote! {}
    };

    let field_calls: Vec<_> = record_info
        .fields
        .iter()
        .map(|f| {
            let field_name = f.field_name.to_string();
            let field_type = &f.field_type;
            let mut decl = quote! { sqlcrud::FieldMapping::new(#field_name, #field_type) };
            if let Some(column_name) = &f.column_name {
                decl = quote! { #decl.column_name(#column_name) };
            }
            if f.is_updatable {
                decl = quote! { #decl.updatable() };
            }
            if f.is_auto_increment {
                decl = quote! { #decl.auto_increment() };
            }
            quote! { .field(#decl) }
        })
        .collect();

    let field_value_arms: Vec<_> = record_info
        .fields
        .iter()
        .map(|f| {
            let field_name = &f.field_name;
            let field_name_str = field_name.to_string();
            quote! { #field_name_str => Some(sqlcrud::IntoValue::into_value(self.#field_name.clone())) }
        })
        .collect();

    let value_entries: Vec<_> = record_info
        .fields
        .iter()
        .map(|f| {
            let field_name = &f.field_name;
            let field_name_str = field_name.to_string();
            quote! { (#field_name_str, sqlcrud::IntoValue::into_value(self.#field_name.clone())) }
        })
        .collect();

    quote! {

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum #field_enum_name {
            #(#field_variants),*
        }

        impl #field_enum_name {
            pub fn name(&self) -> &'static str {
                match self {
                    #(#field_name_arms),*
                }
            }

            pub fn all() -> &'static [Self] {
                &[#(Self::#field_variants),*]
            }
        }

        impl sqlcrud::FieldKey for #field_enum_name {
            fn key(&self) -> &str {
                self.name()
            }
        }

        impl std::fmt::Display for #field_enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        impl sqlcrud::SqlRecord for #name {
            type Field = #field_enum_name;

            fn mapping() -> sqlcrud::TableMapping {
                sqlcrud::TableMapping::new(#type_name)
                    #table_name_call
                    #updatable_call
                    #(#field_calls)*
            }

            fn field_value(&self, field: &str) -> Option<sqlcrud::Value> {
                match field {
                    #(#field_value_arms,)*
                    _ => None,
                }
            }

            fn values(&self) -> Vec<(&'static str, sqlcrud::Value)> {
                vec![#(#value_entries),*]
            }
        }
    }
}

fn rust_type_to_field_type(ty: &Type) -> TokenStream2 {
    let inner_type = extract_option_inner_type(ty).unwrap_or(ty);

    match inner_type {
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last().unwrap();
            let type_name = segment.ident.to_string();
            match type_name.as_str() {
                "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "bool" => {
                    quote! { sqlcrud::FieldType::Integer }
                }
                "f32" | "f64" => quote! { sqlcrud::FieldType::Float },
                "String" | "str" => quote! { sqlcrud::FieldType::Text },
                "Vec" => {
                    if let Some(Type::Path(inner_path)) = extract_vec_inner_type(inner_type) {
                        if let Some(seg) = inner_path.path.segments.last() {
                            if seg.ident == "u8" {
                                return quote! { sqlcrud::FieldType::Blob };
                            }
                        }
                    }
                    quote! { sqlcrud::FieldType::Text }
                }
                _ => quote! { sqlcrud::FieldType::Text },
            }
        }
        _ => quote! { sqlcrud::FieldType::Text },
    }
}

fn extract_option_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return Some(inner);
                    }
                }
            }
        }
    }
    None
}

fn extract_vec_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Vec" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return Some(inner);
                    }
                }
            }
        }
    }
    None
}

fn to_pascal_case(ident: &Ident) -> Ident {
    let pascal = ident.to_string().to_case(Case::Pascal);
    Ident::new(&pascal, ident.span())
}
