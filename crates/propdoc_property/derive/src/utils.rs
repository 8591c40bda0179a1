use proc_macro2::{TokenStream, TokenTree};

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Do any of the identifiers in `idents` appear in `token_stream`?
pub(crate) fn is_any_ident_in_token_stream(idents: &[syn::Ident], token_stream: TokenStream) -> bool {
    token_stream.into_iter().any(|token_tree| match token_tree {
        TokenTree::Ident(ident) => idents.contains(&ident),
        TokenTree::Group(group) => is_any_ident_in_token_stream(idents, group.stream()),
        _ => false,
    })
}
