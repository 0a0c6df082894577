//! Selection of the traits in a source file that should get mocks.

use syn::{File, Item, ItemTrait};

/// Which traits of a file to mock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TraitSelection {
    /// Traits carrying a `#[mock]` (or `#[stubsmith::mock]`) attribute.
    #[default]
    Marked,
    /// Every top-level trait.
    All,
    /// Traits with these names, in file order.
    Named(Vec<String>),
}

impl TraitSelection {
    pub fn includes(&self, item: &ItemTrait) -> bool {
        match self {
            TraitSelection::Marked => is_marked(item),
            TraitSelection::All => true,
            TraitSelection::Named(names) => names.iter().any(|name| item.ident == name),
        }
    }
}

/// Top-level traits of `file` matching `selection`, in source order.
///
/// Traits nested in inline modules are not visited.
pub fn collect_traits<'a>(file: &'a File, selection: &TraitSelection) -> Vec<&'a ItemTrait> {
    file.items
        .iter()
        .filter_map(|item| match item {
            Item::Trait(item) if selection.includes(item) => Some(item),
            _ => None,
        })
        .collect()
}

fn is_marked(item: &ItemTrait) -> bool {
    item.attrs.iter().any(|attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "mock")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn file() -> File {
        parse_quote! {
            #[mock]
            pub trait Users {}

            trait Clock {}

            #[stubsmith::mock(name = FakeStore)]
            trait Store {}

            mod inner {
                #[mock]
                trait Hidden {}
            }
        }
    }

    fn names(traits: Vec<&ItemTrait>) -> Vec<String> {
        traits.iter().map(|t| t.ident.to_string()).collect()
    }

    #[test]
    fn test_marked_selection_finds_attributed_traits() {
        let file = file();
        assert_eq!(
            names(collect_traits(&file, &TraitSelection::Marked)),
            ["Users", "Store"]
        );
    }

    #[test]
    fn test_all_selection_skips_nested_modules() {
        let file = file();
        assert_eq!(
            names(collect_traits(&file, &TraitSelection::All)),
            ["Users", "Clock", "Store"]
        );
    }

    #[test]
    fn test_named_selection_keeps_file_order() {
        let file = file();
        let selection = TraitSelection::Named(vec!["Store".into(), "Clock".into()]);
        assert_eq!(names(collect_traits(&file, &selection)), ["Clock", "Store"]);
    }
}
