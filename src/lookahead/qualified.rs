//! Qualified identifiers
//!
//! A qualified identifier matches one of several fixed leaf sequences
//! (`name`, `schema.name`, `schema.package.name`). Only the first part of
//! each variant can start a match.

use crate::base::NodeId;
use crate::grammar::{PathSegment, QualifiedDef, Variant, VariantPart};

/// Expand a definition into its variants. Path variants are ordered longest
/// first so a driver tries the most specific form before its suffixes.
pub(super) fn expand_variants(def: &QualifiedDef) -> Vec<Variant> {
    match def {
        QualifiedDef::Variants(variants) => variants.clone(),
        QualifiedDef::Path {
            segments,
            separator,
        } => expand_path(segments, *separator),
    }
}

fn expand_path(segments: &[PathSegment], separator: NodeId) -> Vec<Variant> {
    let optional: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.optional)
        .map(|(index, _)| index)
        .collect();

    let mut variants = Vec::with_capacity(1 << optional.len());
    // every bit set keeps the corresponding optional segment
    for mask in (0..1usize << optional.len()).rev() {
        let mut variant = Variant::new();
        for (index, segment) in segments.iter().enumerate() {
            let kept = match optional.iter().position(|&opt| opt == index) {
                Some(bit) => mask & (1 << bit) != 0,
                None => true,
            };
            if !kept {
                continue;
            }
            if !variant.is_empty() {
                variant.push(VariantPart::required(separator));
            }
            variant.push(VariantPart::required(segment.leaf));
        }
        if !variant.is_empty() {
            variants.push(variant);
        }
    }
    variants.sort_by(|a, b| b.len().cmp(&a.len()));
    variants
}

/// The first part of every variant
pub(super) fn heads(variants: &[Variant]) -> impl Iterator<Item = VariantPart> + '_ {
    variants.iter().filter_map(|variant| variant.first().copied())
}

pub(super) fn is_possible_contribution(variants: &[Variant], leaf: NodeId, source: NodeId) -> bool {
    leaf == source && heads(variants).any(|head| head.leaf == source)
}

pub(super) fn is_required_contribution(variants: &[Variant], leaf: NodeId, source: NodeId) -> bool {
    leaf == source && heads(variants).any(|head| head.leaf == source && !head.optional)
}
