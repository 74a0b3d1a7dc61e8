//! Attribute parsing for `#[conf(...)]` annotations.
//!
//! This module extracts and validates the per-field annotations that drive
//! code generation.

use syn::{Field, Lit};

/// Parsed `#[conf(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Environment variable key, trimmed. `Some("")` means the annotation
    /// was written but blank, which excludes the field just like no key.
    pub key: Option<String>,

    /// Raw default string, trimmed. Goes through the same conversion as a
    /// value read from the environment.
    pub default: Option<String>,

    /// Fail the load when neither source nor default provide a value.
    pub required: bool,

    /// Recurse into the field with its name as an extra path segment.
    pub nested: bool,

    /// Recurse into the field without adding a path segment.
    pub flatten: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[conf(...)]` attributes from a struct field.
    ///
    /// Unknown attributes and invalid combinations are compile errors.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("conf") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // key = "VAR"
                if meta.path.is_ident("key") {
                    let value = meta.value()?;
                    let lit: syn::LitStr = value.parse()?;
                    attrs.key = Some(lit.value().trim().to_owned());
                    return Ok(());
                }

                // default = "value" (or a bare numeric/boolean literal)
                if meta.path.is_ident("default") {
                    if !meta.input.peek(syn::Token![=]) {
                        return Err(meta.error(
                            "default needs a value, e.g. default = \"8080\"",
                        ));
                    }
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    attrs.default = Some(literal_text(&lit)?);
                    return Ok(());
                }

                // required or required = true/false
                if meta.path.is_ident("required") {
                    if meta.input.peek(syn::Token![=]) {
                        let value = meta.value()?;
                        let lit: syn::LitBool = value.parse()?;
                        attrs.required = lit.value();
                    } else {
                        attrs.required = true;
                    }
                    return Ok(());
                }

                // nested
                if meta.path.is_ident("nested") {
                    attrs.nested = true;
                    return Ok(());
                }

                // flatten
                if meta.path.is_ident("flatten") {
                    attrs.flatten = true;
                    return Ok(());
                }

                Err(meta.error("unsupported conf attribute"))
            })?;
        }

        attrs.validate(field)?;
        Ok(attrs)
    }

    /// The key this field participates under, or `None` when the field is
    /// skipped. A key that trimmed down to nothing does not count.
    pub fn participation_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| !key.is_empty())
    }

    fn validate(&self, field: &Field) -> syn::Result<()> {
        if self.nested && self.flatten {
            return Err(syn::Error::new_spanned(
                field,
                "a field cannot be both nested and flatten",
            ));
        }
        // A key turns the field into a leaf no matter what else is set, so
        // default/required only need checking on pure recursion fields.
        if (self.nested || self.flatten) && self.participation_key().is_none() {
            if self.default.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "default has no effect on a nested struct",
                ));
            }
            if self.required {
                return Err(syn::Error::new_spanned(
                    field,
                    "required has no effect on a nested struct",
                ));
            }
        }
        Ok(())
    }
}

/// Render a literal as the raw string the runtime will convert.
fn literal_text(lit: &Lit) -> syn::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value().trim().to_owned()),
        Lit::Int(i) => Ok(i.base10_digits().to_owned()),
        Lit::Float(f) => Ok(f.base10_digits().to_owned()),
        Lit::Bool(b) => Ok(b.value().to_string()),
        other => Err(syn::Error::new_spanned(
            other,
            "default must be a string, numeric, or boolean literal; \
             spell other values as strings, e.g. default = \"-1\"",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_key() {
        let field: Field = parse_quote! {
            #[conf(key = "PORT")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.key, Some("PORT".to_string()));
        assert_eq!(attrs.participation_key(), Some("PORT"));
    }

    #[test]
    fn test_key_is_trimmed() {
        let field: Field = parse_quote! {
            #[conf(key = "  PORT  ")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.participation_key(), Some("PORT"));
    }

    #[test]
    fn test_blank_key_does_not_participate() {
        let field: Field = parse_quote! {
            #[conf(key = "   ")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.key, Some(String::new()));
        assert_eq!(attrs.participation_key(), None);
    }

    #[test]
    fn test_no_conf_attribute() {
        let field: Field = parse_quote! {
            pub internal: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.key, None);
        assert_eq!(attrs.participation_key(), None);
        assert!(!attrs.nested);
        assert!(!attrs.flatten);
    }

    #[test]
    fn test_parse_default_string() {
        let field: Field = parse_quote! {
            #[conf(key = "HOST", default = " localhost ")]
            pub host: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("localhost".to_string()));
    }

    #[test]
    fn test_parse_default_number() {
        let field: Field = parse_quote! {
            #[conf(key = "PORT", default = 8080)]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("8080".to_string()));
    }

    #[test]
    fn test_parse_default_float_and_bool() {
        let field: Field = parse_quote! {
            #[conf(key = "RATIO", default = 0.5)]
            pub ratio: f64
        };
        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("0.5".to_string()));

        let field: Field = parse_quote! {
            #[conf(key = "DEBUG", default = false)]
            pub debug: bool
        };
        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("false".to_string()));
    }

    #[test]
    fn test_bare_default_is_rejected() {
        let field: Field = parse_quote! {
            #[conf(key = "PORT", default)]
            pub port: u16
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("default needs a value"));
    }

    #[test]
    fn test_expression_default_is_rejected() {
        let field: Field = parse_quote! {
            #[conf(key = "ADDR", default = "x".to_string())]
            pub addr: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_parse_required_forms() {
        let field: Field = parse_quote! {
            #[conf(key = "URL", required)]
            pub url: String
        };
        assert!(FieldAttrs::from_field(&field).unwrap().required);

        let field: Field = parse_quote! {
            #[conf(key = "URL", required = true)]
            pub url: String
        };
        assert!(FieldAttrs::from_field(&field).unwrap().required);

        let field: Field = parse_quote! {
            #[conf(key = "URL", required = false)]
            pub url: String
        };
        assert!(!FieldAttrs::from_field(&field).unwrap().required);
    }

    #[test]
    fn test_parse_nested_and_flatten() {
        let field: Field = parse_quote! {
            #[conf(nested)]
            pub server: ServerConfig
        };
        assert!(FieldAttrs::from_field(&field).unwrap().nested);

        let field: Field = parse_quote! {
            #[conf(flatten)]
            pub server: ServerConfig
        };
        assert!(FieldAttrs::from_field(&field).unwrap().flatten);
    }

    #[test]
    fn test_key_beats_nested() {
        let field: Field = parse_quote! {
            #[conf(key = "SERVER", nested)]
            pub server: ServerConfig
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.participation_key(), Some("SERVER"));
        assert!(attrs.nested);
    }

    #[test]
    fn test_nested_and_flatten_conflict() {
        let field: Field = parse_quote! {
            #[conf(nested, flatten)]
            pub server: ServerConfig
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("nested and flatten"));
    }

    #[test]
    fn test_default_on_pure_nested_is_rejected() {
        let field: Field = parse_quote! {
            #[conf(nested, default = "x")]
            pub server: ServerConfig
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("no effect"));
    }

    #[test]
    fn test_required_on_pure_nested_is_rejected() {
        let field: Field = parse_quote! {
            #[conf(flatten, required)]
            pub server: ServerConfig
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("no effect"));
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let field: Field = parse_quote! {
            #[conf(prefix = "APP_")]
            pub name: String
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("unsupported conf attribute"));
    }

    #[test]
    fn test_parse_multiple_attributes() {
        let field: Field = parse_quote! {
            #[conf(key = "DB_URL", default = "postgres://localhost", required)]
            pub database_url: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.participation_key(), Some("DB_URL"));
        assert_eq!(attrs.default, Some("postgres://localhost".to_string()));
        assert!(attrs.required);
    }
}
