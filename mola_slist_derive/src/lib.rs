use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DataStruct, DeriveInput, Field, Fields, Ident, LitStr, Token, Type, TypePath,
    parenthesized,
    parse::{Parse, ParseStream},
    parse_macro_input, token,
};

struct NodeAttribute {
    crate_path: syn::Path,
}

/// Parses the attribute in the format: `crate_path = "path::to::crate"`.
impl Parse for NodeAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        if key != "crate_path" {
            return Err(syn::Error::new(key.span(), "expected attribute `crate_path`"));
        }

        let _: Token![=] = input.parse()?;
        let value: LitStr = input.parse()?;
        let path: syn::Path = value.parse()?;

        Ok(NodeAttribute { crate_path: path })
    }
}

/// Node fields recognised by the derive, in declaration order.
struct NodeFields {
    link: Field,
    tag: Option<Field>,
    data: Option<Field>,
}

/// Returns true if the struct carries `#[repr(C)]`.
///
/// The link is reinterpreted as the whole node, so the layout has to be fixed.
/// Other representation hints such as `align(8)` may sit next to `C`.
fn has_repr_c(attrs: &[Attribute]) -> syn::Result<bool> {
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        let mut found = false;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("C") {
                found = true;
            } else if meta.input.peek(token::Paren) {
                // Skip the arguments of hints like `align(8)` or `packed(2)`.
                let args;
                parenthesized!(args in meta.input);
                args.parse::<proc_macro2::TokenStream>()?;
            }
            Ok(())
        })?;
        if found {
            return Ok(true);
        }
    }
    Ok(false)
}

fn collect_fields(input: &DeriveInput) -> syn::Result<NodeFields> {
    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => fields,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Node derive macro only supports structs with named fields",
            ));
        }
    };

    let mut link = None;
    let mut tag = None;
    let mut data = None;

    for (index, field) in fields.named.iter().enumerate() {
        let Some(ident) = &field.ident else { continue };
        match ident.to_string().as_str() {
            "link" => {
                if index != 0 {
                    return Err(syn::Error::new_spanned(
                        ident,
                        "Field 'link' must be the first field of the node",
                    ));
                }
                link = Some(field.clone());
            }
            "tag" => tag = Some(field.clone()),
            "data" => data = Some(field.clone()),
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "Unexpected field name: expected 'link', 'tag' or 'data'",
                ));
            }
        }
    }

    let link = link.ok_or_else(|| {
        syn::Error::new_spanned(&input.ident, "Struct must have a field named 'link'")
    })?;

    Ok(NodeFields { link, tag, data })
}

fn check_link_type(link: &Field) -> syn::Result<()> {
    let Type::Path(TypePath { path, .. }) = &link.ty else {
        return Err(syn::Error::new_spanned(
            &link.ty,
            "Field 'link' must be a Link type",
        ));
    };

    let Some(segment) = path.segments.last() else {
        return Err(syn::Error::new_spanned(path, "Field 'link' has an empty type path"));
    };

    if segment.ident != "SingleLink" {
        return Err(syn::Error::new_spanned(
            &segment.ident,
            "Field 'link' must be a 'SingleLink'",
        ));
    }

    Ok(())
}

/// Derive macro for creating singly linked list nodes.
///
/// The struct must be `#[repr(C)]`, start with a `link: SingleLink` field and may
/// carry a `tag: NodeTag` (ownership tag) and a `data` field.
#[proc_macro_derive(Node, attributes(node))]
pub fn node_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Find absolute crate path
    let mut crate_path = quote! { ::mola_slist };

    for attr in &input.attrs {
        if attr.path().is_ident("node") {
            let path = attr.parse_args::<NodeAttribute>()?.crate_path;
            crate_path = quote! { #path };
            break;
        }
    }

    if !has_repr_c(&input.attrs)? {
        return Err(syn::Error::new_spanned(
            struct_name,
            "Node structs must be #[repr(C)] so the link sits at offset 0",
        ));
    }

    let fields = collect_fields(input)?;
    check_link_type(&fields.link)?;

    let intrusive_path = quote! { #crate_path::linked_list::intrusive };

    // Generate `Link` and `Node` trait implementations
    let link_impl = quote! {
        impl #impl_generics #intrusive_path::traits::Link for #struct_name #ty_generics #where_clause {
            type Target = Self;

            #[inline]
            fn next(&self) -> Option<::core::ptr::NonNull<Self::Target>> {
                #intrusive_path::traits::Link::next(&self.link).map(|n| n.cast())
            }

            #[inline]
            fn set_next(&mut self, next: Option<::core::ptr::NonNull<Self::Target>>) {
                #intrusive_path::traits::Link::set_next(&mut self.link, next.map(|n| n.cast()));
            }
        }

        impl #impl_generics #intrusive_path::traits::Node for #struct_name #ty_generics #where_clause {
            #[inline]
            fn link_after<L>(&mut self, parent: &mut L)
            where
                L: #intrusive_path::traits::Link<Target = Self>,
            {
                unsafe {
                    let mut wrapper = #intrusive_path::wrapper::LinkWrapper::new(parent);
                    #intrusive_path::traits::Node::link_after(&mut self.link, &mut wrapper);
                }
            }

            #[inline]
            unsafe fn detach<L>(&mut self, parent: &mut L)
            where
                L: #intrusive_path::traits::Link<Target = Self>,
            {
                unsafe {
                    let mut wrapper = #intrusive_path::wrapper::LinkWrapper::new(parent);
                    #intrusive_path::traits::Node::detach(&mut self.link, &mut wrapper);
                }
            }
        }
    };

    // Generate `Tagged` trait implementation if `tag` field exists
    let tag_impl = match &fields.tag {
        Some(_) => quote! {
            impl #impl_generics #intrusive_path::traits::Tagged for #struct_name #ty_generics #where_clause {
                #[inline]
                fn tag(&self) -> &#intrusive_path::tag::NodeTag {
                    &self.tag
                }

                #[inline]
                fn tag_mut(&mut self) -> &mut #intrusive_path::tag::NodeTag {
                    &mut self.tag
                }
            }
        },
        None => quote! {},
    };

    // Generate `NodeWithData` trait implementation if `data` field exists
    let data_impl = match &fields.data {
        Some(data_field) => {
            let data_type = &data_field.ty;
            quote! {
                impl #impl_generics #intrusive_path::traits::NodeWithData for #struct_name #ty_generics #where_clause {
                    type Data = #data_type;

                    #[inline]
                    fn data(&self) -> &Self::Data {
                        &self.data
                    }

                    #[inline]
                    fn data_mut(&mut self) -> &mut Self::Data {
                        &mut self.data
                    }

                    #[inline]
                    fn into_data(self) -> Self::Data {
                        self.data
                    }
                }
            }
        }
        None => quote! {},
    };

    Ok(quote! {
        #link_impl
        #tag_impl
        #data_impl
    })
}
