use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::{
    FnArg, GenericArgument, ImplItem, ImplItemFn, ItemImpl, LitStr, Meta, PathArguments,
    ReturnType, Type, Visibility, parse_macro_input, spanned::Spanned,
};

/// Registers a provider's zero-argument operations by name.
///
/// Put it on an inherent `impl` block and name the output type:
/// `#[operations(String)]`. Every `pub fn` taking only `&self` / `&mut self`
/// and returning the output type, or a `Result` of it failing with
/// `fakers::Error`, is registered under its PascalCase name
/// (`first_name` -> `FirstName`).
///
/// Method attribute: `#[operation]`, `#[operation(name = "...")]`,
/// `#[operation(skip)]`.
#[proc_macro_attribute]
pub fn operations(attr: TokenStream, item: TokenStream) -> TokenStream {
    let output = parse_macro_input!(attr as Type);
    let mut item_impl = parse_macro_input!(item as ItemImpl);

    if let Some((_, path, _)) = &item_impl.trait_ {
        return syn::Error::new(
            path.span(),
            "#[operations] must be placed on an inherent impl block",
        )
        .to_compile_error()
        .into();
    }

    let output_key = output.to_token_stream().to_string();
    let mut names: Vec<String> = Vec::new();
    let mut arms = Vec::new();

    for impl_item in &mut item_impl.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        let directive = match take_directive(method) {
            Ok(d) => d,
            Err(err) => return err.to_compile_error().into(),
        };
        if directive.skip {
            continue;
        }

        let shape = match operation_shape(method, &output_key) {
            Ok(shape) => shape,
            Err(err) => return err.to_compile_error().into(),
        };
        let Some(shape) = shape else {
            if directive.explicit {
                return syn::Error::new(
                    method.sig.span(),
                    "#[operation] methods must be `pub`, take only `&self` or `&mut self`, \
                     and return the declared output type or a Result of it",
                )
                .to_compile_error()
                .into();
            }
            continue;
        };

        let ident = &method.sig.ident;
        let name = directive
            .name
            .unwrap_or_else(|| pascal_case(&ident.to_string()));
        if names.contains(&name) {
            return syn::Error::new(
                method.sig.span(),
                format!("operation name `{name}` is registered twice"),
            )
            .to_compile_error()
            .into();
        }

        let call = match shape {
            Shape::Plain => quote! { ::core::result::Result::Ok(provider.#ident()) },
            Shape::Fallible => quote! { provider.#ident() },
        };
        arms.push(quote! {
            #name => {
                let producer: fakers::Producer<Self, #output> = |provider: &mut Self| #call;
                ::core::option::Option::Some(producer)
            }
        });
        names.push(name);
    }

    let self_ty = &item_impl.self_ty;
    let (impl_generics, _, where_clause) = item_impl.generics.split_for_impl();

    let expanded = quote! {
        #item_impl

        impl #impl_generics fakers::Operations for #self_ty #where_clause {
            type Output = #output;

            const NAMES: &'static [&'static str] = &[#(#names),*];

            fn operation(name: &str) -> ::core::option::Option<fakers::Producer<Self, #output>> {
                match name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    expanded.into()
}

#[derive(Default)]
struct Directive {
    explicit: bool,
    skip: bool,
    name: Option<String>,
}

/// Parse and strip `#[operation(...)]` from a method.
fn take_directive(method: &mut ImplItemFn) -> syn::Result<Directive> {
    let mut directive = Directive::default();
    for attr in &method.attrs {
        if !attr.path().is_ident("operation") {
            continue;
        }
        directive.explicit = true;
        if let Meta::Path(_) = attr.meta {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                directive.skip = true;
                Ok(())
            } else if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(meta.error("operation name must not be empty"));
                }
                directive.name = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `name = \"...\"`"))
            }
        })?;
    }
    method.attrs.retain(|attr| !attr.path().is_ident("operation"));
    Ok(directive)
}

enum Shape {
    /// Returns the output type directly.
    Plain,
    /// Returns `Result<Output, _>`.
    Fallible,
}

/// `None` when the method is not an operation; an error when it looks like
/// one but returns a `Result` with some other error type.
fn operation_shape(method: &ImplItemFn, output_key: &str) -> syn::Result<Option<Shape>> {
    let sig = &method.sig;
    if !matches!(method.vis, Visibility::Public(_))
        || !sig.generics.params.is_empty()
        || sig.asyncness.is_some()
        || sig.unsafety.is_some()
    {
        return Ok(None);
    }

    let mut inputs = sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() => {}
        _ => return Ok(None),
    }
    if inputs.next().is_some() {
        return Ok(None);
    }

    let ReturnType::Type(_, ty) = &sig.output else {
        return Ok(None);
    };
    if ty.to_token_stream().to_string() == output_key {
        return Ok(Some(Shape::Plain));
    }

    let Type::Path(path) = ty.as_ref() else {
        return Ok(None);
    };
    let Some(segment) = path.path.segments.last() else {
        return Ok(None);
    };
    if segment.ident != "Result" {
        return Ok(None);
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Ok(None);
    };
    let mut args = args.args.iter();
    match args.next() {
        Some(GenericArgument::Type(inner)) if inner.to_token_stream().to_string() == output_key => {}
        _ => return Ok(None),
    }
    match args.next() {
        None => Ok(Some(Shape::Fallible)),
        Some(GenericArgument::Type(Type::Path(error))) if is_crate_error(&error.path) => {
            Ok(Some(Shape::Fallible))
        }
        Some(other) => Err(syn::Error::new(
            other.span(),
            "operations must fail with `fakers::Error`",
        )),
    }
}

/// `Error`, `fakers::...::Error` or `crate::...::Error`.
fn is_crate_error(path: &syn::Path) -> bool {
    let segments: Vec<_> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    match segments.as_slice() {
        [only] => only == "Error",
        [first, .., last] => (first == "fakers" || first == "crate") && last == "Error",
        [] => false,
    }
}

/// `first_name` -> `FirstName`
fn pascal_case(ident: &str) -> String {
    ident
        .trim_start_matches("r#")
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
