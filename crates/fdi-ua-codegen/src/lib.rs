// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Derive macros for `fdi-ua` data types.
//!
//! - `#[derive(Encodeable)]` on records with named fields
//! - `#[derive(Enumeration)]` on `#[repr(i32)]` fieldless enums
//!
//! Generated code refers to the runtime through `::fdi_ua`, so the deriving
//! crate must depend on `fdi-ua` under that name.

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, ExprLit, ExprUnary, Fields, Ident,
    Lit, LitInt, LitStr, Type, UnOp,
};

/// How a field takes part in null-default handling.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// bool, integers and floats: no null state.
    Primitive,
    /// `String`: empty string stands in for null.
    String,
    /// Everything else: `set_<field>(None)` stores the default instance.
    Reference,
}

struct FieldInfo {
    ident: Ident,
    ty: Type,
    wire_name: String,
    kind: FieldKind,
}

/// Type-level `#[encodeable(...)]` arguments.
struct RecordAttrs {
    namespace: Expr,
    xml_namespace: Expr,
    data_type: LitInt,
    binary_encoding: LitInt,
    xml_encoding: LitInt,
    name: Option<LitStr>,
}

/// `#[derive(Encodeable)]`: implements `Encodeable`, `FieldCodec`,
/// `VariantValue` and `VariantScalar`, adds `set_<field>` null-default setters
/// for reference fields and a `<Name>Collection` alias.
///
/// Example:
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Default, Encodeable)]
/// #[encodeable(namespace = UA_NAMESPACE, xml_namespace = UA_TYPES_XSD,
///              data_type = 296, binary_encoding = 298, xml_encoding = 297)]
/// pub struct Argument {
///     pub name: String,
///     pub data_type: NodeId,
///     pub value_rank: i32,
///     pub array_dimensions: Vec<u32>,
///     pub description: LocalizedText,
/// }
/// ```
///
/// Fields are encoded in declaration order under their PascalCase names;
/// `#[encodeable(rename = "...")]` on a field overrides the name.
#[proc_macro_derive(Encodeable, attributes(encodeable))]
pub fn derive_encodeable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_encodeable(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_encodeable(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Encodeable records cannot be generic",
        ));
    }

    let name = &input.ident;
    let vis = &input.vis;
    let attrs = parse_record_attrs(input)?;
    let type_name = attrs
        .name
        .as_ref()
        .map_or_else(|| name.to_string(), LitStr::value);

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Encodeable needs named fields; use `struct Name {}` for an empty record",
                ))
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(input, "Only named fields are supported"))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let mut infos = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let wire_name = match field_rename(&field.attrs)? {
            Some(rename) => rename.value(),
            None => to_pascal_case(&ident.to_string()),
        };
        infos.push(FieldInfo {
            kind: field_kind(&field.ty),
            ty: field.ty.clone(),
            ident,
            wire_name,
        });
    }

    let RecordAttrs {
        namespace,
        xml_namespace,
        data_type,
        binary_encoding,
        xml_encoding,
        ..
    } = &attrs;

    let field_definitions = infos.iter().map(|f| {
        let wire = &f.wire_name;
        let ty = &f.ty;
        quote! {
            ::fdi_ua::encodeable::FieldDefinition {
                name: #wire,
                type_name: <#ty as ::fdi_ua::encoding::FieldCodec>::ELEMENT_NAME,
                is_array: <#ty as ::fdi_ua::encoding::FieldCodec>::IS_ARRAY,
            }
        }
    });

    let field_types = infos.iter().map(|f| &f.ty);
    let min_binary_size = quote! {
        0 #(+ <#field_types as ::fdi_ua::encoding::FieldCodec>::MIN_BINARY_SIZE)*
    };

    let encode_body = if infos.is_empty() {
        quote! { |_| Ok(()) }
    } else {
        let writes = infos.iter().map(|f| {
            let ident = &f.ident;
            let wire = &f.wire_name;
            quote! {
                ::fdi_ua::encoding::FieldCodec::write_field(&self.#ident, #wire, encoder)?;
            }
        });
        quote! {
            |encoder| {
                #(#writes)*
                Ok(())
            }
        }
    };

    let decode_body = if infos.is_empty() {
        quote! { |_| Ok(Self {}) }
    } else {
        let reads = infos.iter().map(|f| {
            let ident = &f.ident;
            let wire = &f.wire_name;
            let ty = &f.ty;
            quote! {
                #ident: <#ty as ::fdi_ua::encoding::FieldCodec>::read_field(#wire, decoder)?,
            }
        });
        quote! {
            |decoder| {
                Ok(Self {
                    #(#reads)*
                })
            }
        }
    };

    let setters: Vec<_> = infos
        .iter()
        .filter(|f| f.kind == FieldKind::Reference)
        .map(|f| {
            let ident = &f.ident;
            let ty = &f.ty;
            let setter = format_ident!("set_{}", ident);
            let doc = format!(
                "Set `{}`; `None` stores the default instance.",
                f.wire_name
            );
            quote! {
                #[doc = #doc]
                pub fn #setter(&mut self, value: ::core::option::Option<#ty>) {
                    self.#ident = value.unwrap_or_default();
                }
            }
        })
        .collect();

    let setters_impl = if setters.is_empty() {
        quote! {}
    } else {
        quote! {
            impl #name {
                #(#setters)*
            }
        }
    };

    let collection = format_ident!("{}Collection", name);
    let collection_doc = format!("Ordered collection of [`{name}`] records.");

    Ok(quote! {
        impl ::fdi_ua::encodeable::Encodeable for #name {
            const TYPE_NAME: &'static str = #type_name;
            const TYPE_IDS: ::fdi_ua::encodeable::TypeIds = ::fdi_ua::encodeable::TypeIds {
                namespace_uri: #namespace,
                xml_namespace: #xml_namespace,
                data_type: #data_type,
                binary_encoding: #binary_encoding,
                xml_encoding: #xml_encoding,
            };

            fn structure_definition() -> &'static ::fdi_ua::encodeable::StructureDefinition {
                static DEFINITION: ::fdi_ua::encodeable::StructureDefinition =
                    ::fdi_ua::encodeable::StructureDefinition {
                        name: #type_name,
                        fields: &[#(#field_definitions),*],
                    };
                &DEFINITION
            }

            fn encode(
                &self,
                encoder: &mut dyn ::fdi_ua::encoding::Encoder,
            ) -> ::fdi_ua::error::Result<()> {
                ::fdi_ua::encoding::scoped_encode(
                    encoder,
                    <Self as ::fdi_ua::encodeable::Encodeable>::TYPE_IDS.xml_namespace,
                    #encode_body,
                )
            }

            fn decode(
                decoder: &mut dyn ::fdi_ua::encoding::Decoder,
            ) -> ::fdi_ua::error::Result<Self> {
                ::fdi_ua::encoding::scoped_decode(
                    decoder,
                    <Self as ::fdi_ua::encodeable::Encodeable>::TYPE_IDS.xml_namespace,
                    #decode_body,
                )
            }
        }

        impl ::fdi_ua::encoding::FieldCodec for #name {
            const ELEMENT_NAME: &'static str = #type_name;
            const MIN_BINARY_SIZE: usize = #min_binary_size;

            fn write_field(
                &self,
                name: &str,
                encoder: &mut dyn ::fdi_ua::encoding::Encoder,
            ) -> ::fdi_ua::error::Result<()> {
                ::fdi_ua::encodeable::write_structure_field(self, name, encoder)
            }

            fn read_field(
                name: &str,
                decoder: &mut dyn ::fdi_ua::encoding::Decoder,
            ) -> ::fdi_ua::error::Result<Self> {
                ::fdi_ua::encodeable::read_structure_field(name, decoder)
            }
        }

        impl ::fdi_ua::types::VariantValue for #name {
            fn into_variant(self) -> ::fdi_ua::types::Variant {
                ::fdi_ua::types::Variant::ExtensionObject(
                    ::fdi_ua::types::ExtensionObject::from_encodeable(self),
                )
            }

            fn from_variant(value: &::fdi_ua::types::Variant) -> ::core::option::Option<Self> {
                match value {
                    ::fdi_ua::types::Variant::ExtensionObject(object) => {
                        object.downcast_ref::<Self>().cloned()
                    }
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::fdi_ua::types::VariantScalar for #name {
            const BUILTIN_TYPE: ::fdi_ua::types::BuiltinType =
                ::fdi_ua::types::BuiltinType::ExtensionObject;
        }

        #setters_impl

        #[doc = #collection_doc]
        #vis type #collection = ::fdi_ua::collection::Collection<#name>;
    })
}

fn parse_record_attrs(input: &DeriveInput) -> syn::Result<RecordAttrs> {
    let mut namespace = None;
    let mut xml_namespace = None;
    let mut data_type = None;
    let mut binary_encoding = None;
    let mut xml_encoding = None;
    let mut name = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("encodeable")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("namespace") {
                namespace = Some(meta.value()?.parse::<Expr>()?);
            } else if meta.path.is_ident("xml_namespace") {
                xml_namespace = Some(meta.value()?.parse::<Expr>()?);
            } else if meta.path.is_ident("data_type") {
                data_type = Some(meta.value()?.parse::<LitInt>()?);
            } else if meta.path.is_ident("binary_encoding") {
                binary_encoding = Some(meta.value()?.parse::<LitInt>()?);
            } else if meta.path.is_ident("xml_encoding") {
                xml_encoding = Some(meta.value()?.parse::<LitInt>()?);
            } else if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?);
            } else {
                return Err(meta.error("unknown encodeable attribute"));
            }
            Ok(())
        })?;
    }

    let missing = |what: &str| {
        syn::Error::new_spanned(
            &input.ident,
            format!("missing #[encodeable({what} = ...)]"),
        )
    };

    Ok(RecordAttrs {
        namespace: namespace.ok_or_else(|| missing("namespace"))?,
        xml_namespace: xml_namespace.ok_or_else(|| missing("xml_namespace"))?,
        data_type: data_type.ok_or_else(|| missing("data_type"))?,
        binary_encoding: binary_encoding.ok_or_else(|| missing("binary_encoding"))?,
        xml_encoding: xml_encoding.ok_or_else(|| missing("xml_encoding"))?,
        name,
    })
}

/// `#[encodeable(rename = "...")]` / `#[enumeration(rename = "...")]` on a
/// field or variant.
fn rename_attr(attrs: &[Attribute], attribute: &str) -> syn::Result<Option<LitStr>> {
    let mut rename = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident(attribute)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                rename = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("expected `rename = \"...\"`"))
            }
        })?;
    }
    Ok(rename)
}

fn field_rename(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    rename_attr(attrs, "encodeable")
}

fn field_kind(ty: &Type) -> FieldKind {
    let Type::Path(type_path) = ty else {
        return FieldKind::Reference;
    };
    let Some(segment) = type_path.path.segments.last() else {
        return FieldKind::Reference;
    };
    match segment.ident.to_string().as_str() {
        "bool" | "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "f32" | "f64" => {
            FieldKind::Primitive
        }
        "String" => FieldKind::String,
        _ => FieldKind::Reference,
    }
}

/// `node_status` -> `NodeStatus`.
fn to_pascal_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect()
}

// ============================================================================
// Enumerations
// ============================================================================

/// `#[derive(Enumeration)]` (the enum must also be `Copy`): implements `TryFrom<i32>`, `From<Self> for i32`,
/// `Display` (`Name_Value`), `FieldCodec`, `VariantValue` and `VariantScalar`
/// for a fieldless enum.
///
/// Example:
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
/// #[repr(i32)]
/// #[enumeration(namespace = DI_NAMESPACE, data_type = 6244)]
/// pub enum DeviceHealthEnum {
///     #[default]
///     #[enumeration(rename = "NORMAL")]
///     Normal = 0,
///     #[enumeration(rename = "FAILURE")]
///     Failure = 1,
/// }
/// ```
#[proc_macro_derive(Enumeration, attributes(enumeration))]
pub fn derive_enumeration(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_enumeration(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_enumeration(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(input, "Only enums are supported"));
    };

    let mut namespace = None;
    let mut data_type = None;
    let mut type_name = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("enumeration")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("namespace") {
                namespace = Some(meta.value()?.parse::<Expr>()?);
            } else if meta.path.is_ident("data_type") {
                data_type = Some(meta.value()?.parse::<LitInt>()?);
            } else if meta.path.is_ident("name") {
                type_name = Some(meta.value()?.parse::<LitStr>()?);
            } else {
                return Err(meta.error("unknown enumeration attribute"));
            }
            Ok(())
        })?;
    }
    let namespace = namespace.ok_or_else(|| {
        syn::Error::new_spanned(name, "missing #[enumeration(namespace = ...)]")
    })?;
    let data_type = data_type.ok_or_else(|| {
        syn::Error::new_spanned(name, "missing #[enumeration(data_type = ...)]")
    })?;
    let type_name = type_name.map_or_else(|| name.to_string(), |lit| lit.value());

    let mut idents = Vec::new();
    let mut values = Vec::new();
    let mut symbols = Vec::new();
    let mut next_value = 0i64;
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Enumeration variants cannot carry data",
            ));
        }
        let value = match &variant.discriminant {
            Some((_, expr)) => discriminant_value(expr)?,
            None => next_value,
        };
        let value = i32::try_from(value).map_err(|_| {
            syn::Error::new_spanned(variant, "discriminant does not fit in i32")
        })?;
        next_value = i64::from(value) + 1;

        let symbol = match rename_attr(&variant.attrs, "enumeration")? {
            Some(rename) => rename.value(),
            None => variant.ident.to_string(),
        };
        idents.push(variant.ident.clone());
        values.push(value);
        symbols.push(symbol);
    }

    let xml_symbols: Vec<String> = symbols
        .iter()
        .zip(&values)
        .map(|(symbol, value)| format!("{symbol}_{value}"))
        .collect();
    let values: Vec<Literal> = values.into_iter().map(Literal::i32_unsuffixed).collect();

    Ok(quote! {
        impl #name {
            pub const TYPE_NAME: &'static str = #type_name;
            pub const NAMESPACE_URI: &'static str = #namespace;
            pub const DATA_TYPE: u32 = #data_type;
            pub const VARIANTS: &'static [#name] = &[#(#name::#idents),*];

            /// Data type id qualified by namespace URI.
            pub fn data_type_id() -> ::fdi_ua::types::ExpandedNodeId {
                ::fdi_ua::types::ExpandedNodeId::with_namespace_uri(
                    Self::NAMESPACE_URI,
                    Self::DATA_TYPE,
                )
            }

            /// Symbolic name without the numeric suffix.
            pub fn symbol(self) -> &'static str {
                match self {
                    #(#name::#idents => #symbols,)*
                }
            }

            /// `Name_Value` text used by the XML encoding.
            pub fn xml_symbol(self) -> &'static str {
                match self {
                    #(#name::#idents => #xml_symbols,)*
                }
            }

            pub fn from_symbol(symbol: &str) -> ::core::option::Option<Self> {
                match symbol {
                    #(#symbols => ::core::option::Option::Some(#name::#idents),)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::core::convert::TryFrom<i32> for #name {
            type Error = i32;

            fn try_from(value: i32) -> ::core::result::Result<Self, i32> {
                match value {
                    #(#values => ::core::result::Result::Ok(#name::#idents),)*
                    other => ::core::result::Result::Err(other),
                }
            }
        }

        impl ::core::convert::From<#name> for i32 {
            fn from(value: #name) -> i32 {
                match value {
                    #(#name::#idents => #values,)*
                }
            }
        }

        impl ::core::fmt::Display for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.xml_symbol())
            }
        }

        impl ::fdi_ua::encoding::FieldCodec for #name {
            const ELEMENT_NAME: &'static str = #type_name;
            const MIN_BINARY_SIZE: usize = 4;

            fn write_field(
                &self,
                name: &str,
                encoder: &mut dyn ::fdi_ua::encoding::Encoder,
            ) -> ::fdi_ua::error::Result<()> {
                encoder.write_enumerated(name, self.xml_symbol(), i32::from(*self))
            }

            fn read_field(
                name: &str,
                decoder: &mut dyn ::fdi_ua::encoding::Decoder,
            ) -> ::fdi_ua::error::Result<Self> {
                let value = decoder.read_enumerated(name)?;
                ::fdi_ua::encodeable::enumeration_from_i32(name, value)
            }
        }

        impl ::fdi_ua::types::VariantValue for #name {
            fn into_variant(self) -> ::fdi_ua::types::Variant {
                ::fdi_ua::types::Variant::Int32(i32::from(self))
            }

            fn from_variant(value: &::fdi_ua::types::Variant) -> ::core::option::Option<Self> {
                match value {
                    ::fdi_ua::types::Variant::Int32(v) => {
                        <Self as ::core::convert::TryFrom<i32>>::try_from(*v).ok()
                    }
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::fdi_ua::types::VariantScalar for #name {
            const BUILTIN_TYPE: ::fdi_ua::types::BuiltinType = ::fdi_ua::types::BuiltinType::Int32;
        }
    })
}

/// Integer value of an explicit discriminant (`= 3` or `= -1`).
fn discriminant_value(expr: &Expr) -> syn::Result<i64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(lit), ..
        }) => lit.base10_parse::<i64>(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => discriminant_value(expr).map(|value| -value),
        other => Err(syn::Error::new_spanned(
            other,
            "discriminant must be an integer literal",
        )),
    }
}
