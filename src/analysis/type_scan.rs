//! Detection of type constructs a generated stub cannot name.

use syn::visit::{self, Visit};
use syn::{Type, TypeImplTrait, TypePath, TypeReference};

/// First construct found in a type that the stub closure type cannot carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unnameable {
    ImplTrait,
    SelfType,
    ElidedBorrow,
}

impl Unnameable {
    pub fn describe(&self) -> &'static str {
        match self {
            Unnameable::ImplTrait => "`impl Trait` types cannot be stored in a stub",
            Unnameable::SelfType => "types mentioning `Self` cannot be named outside the trait",
            Unnameable::ElidedBorrow => "a returned borrow needs an explicit `'static` lifetime",
        }
    }
}

/// Scans a parameter type.
pub fn scan_input(ty: &Type) -> Option<Unnameable> {
    let mut scanner = TypeScanner::new(false);
    scanner.visit_type(ty);
    scanner.found
}

/// Scans a return type, where elided borrows are also rejected.
pub fn scan_output(ty: &Type) -> Option<Unnameable> {
    let mut scanner = TypeScanner::new(true);
    scanner.visit_type(ty);
    scanner.found
}

struct TypeScanner {
    reject_elided_borrows: bool,
    found: Option<Unnameable>,
}

impl TypeScanner {
    fn new(reject_elided_borrows: bool) -> Self {
        Self {
            reject_elided_borrows,
            found: None,
        }
    }

    fn record(&mut self, what: Unnameable) {
        self.found.get_or_insert(what);
    }
}

impl<'ast> Visit<'ast> for TypeScanner {
    fn visit_type_impl_trait(&mut self, node: &'ast TypeImplTrait) {
        self.record(Unnameable::ImplTrait);
        visit::visit_type_impl_trait(self, node);
    }

    fn visit_type_path(&mut self, node: &'ast TypePath) {
        let mentions_self = node
            .path
            .segments
            .first()
            .is_some_and(|segment| segment.ident == "Self")
            || node
                .qself
                .as_ref()
                .is_some_and(|qself| matches!(&*qself.ty, Type::Path(p) if p.path.is_ident("Self")));
        if mentions_self {
            self.record(Unnameable::SelfType);
        }
        visit::visit_type_path(self, node);
    }

    fn visit_type_reference(&mut self, node: &'ast TypeReference) {
        if self.reject_elided_borrows && node.lifetime.is_none() {
            self.record(Unnameable::ElidedBorrow);
        }
        visit::visit_type_reference(self, node);
    }

    // Borrows inside `Fn(&T)` sugar are higher-ranked, not elided.
    fn visit_parenthesized_generic_arguments(
        &mut self,
        node: &'ast syn::ParenthesizedGenericArguments,
    ) {
        let saved = self.reject_elided_borrows;
        self.reject_elided_borrows = false;
        visit::visit_parenthesized_generic_arguments(self, node);
        self.reject_elided_borrows = saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_plain_types_are_nameable() {
        let ty: Type = parse_quote!(Result<Vec<String>, std::io::Error>);
        assert_eq!(scan_input(&ty), None);
        assert_eq!(scan_output(&ty), None);
    }

    #[test]
    fn test_impl_trait_is_rejected() {
        let ty: Type = parse_quote!(impl Iterator<Item = u8>);
        assert_eq!(scan_input(&ty), Some(Unnameable::ImplTrait));
    }

    #[test]
    fn test_self_is_rejected() {
        let assoc: Type = parse_quote!(Self::Item);
        let qualified: Type = parse_quote!(<Self as Iterator>::Item);
        let nested: Type = parse_quote!(Vec<Self>);
        assert_eq!(scan_input(&assoc), Some(Unnameable::SelfType));
        assert_eq!(scan_input(&qualified), Some(Unnameable::SelfType));
        assert_eq!(scan_input(&nested), Some(Unnameable::SelfType));
    }

    #[test]
    fn test_elided_borrow_only_rejected_in_output() {
        let ty: Type = parse_quote!(Result<&str, Error>);
        assert_eq!(scan_input(&ty), None);
        assert_eq!(scan_output(&ty), Some(Unnameable::ElidedBorrow));

        let static_ty: Type = parse_quote!(Result<&'static str, Error>);
        assert_eq!(scan_output(&static_ty), None);
    }

    #[test]
    fn test_borrows_in_fn_sugar_are_allowed_in_output() {
        let ty: Type = parse_quote!(Result<Box<dyn Fn(&str) -> usize + Send>, Error>);
        assert_eq!(scan_output(&ty), None);
    }
}
