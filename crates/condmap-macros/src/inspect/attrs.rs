//! Attribute parsing for the Inspect derive macro.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[inspect(...)]`.
#[derive(Debug, Clone, Default)]
pub struct InspectAttr {
    /// Hide this field.
    pub skip: bool,
    /// Custom name in field paths (default: field name).
    pub rename: Option<String>,
}

impl Parse for InspectAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = InspectAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => {
                    attr.skip = true;
                }

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    };
                    if s.value().is_empty() || s.value().contains('.') {
                        return Err(Error::new(
                            s.span(),
                            "rename must be non-empty and must not contain '.'",
                        ));
                    }
                    attr.rename = Some(s.value());
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown inspect attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[inspect(...)]` attributes from a field's attributes.
pub fn parse_inspect_attrs(attrs: &[Attribute]) -> Result<InspectAttr> {
    for attr in attrs {
        if attr.path().is_ident("inspect") {
            return attr.parse_args::<InspectAttr>();
        }
    }
    Ok(InspectAttr::default())
}
