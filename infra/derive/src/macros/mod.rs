pub mod api;
pub mod error;
pub mod slice;

use fxhash::FxHashSet;
use syn::Attribute;

/// Collects the last path segment of every trait listed in `#[derive(...)]` attributes.
pub fn derived_trait_names(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(seg) = meta.path.segments.last() {
                traits.insert(seg.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}
