//! Property tests over randomly assembled markup.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use thicket_dom::{Node, NodeKind};
use thicket_html::parse;

const FRAGMENTS: &[&str] = &[
    "<div>", "</div>", "<p>", "</p>", "<span class=a>", "</span>", "<br>", "<img src=x/>",
    "x", " ", "\n", "&amp;", "&bogus;", "<!-- c -->", "</b>", "<script>1<2</script>",
];

/// Markup built from a small vocabulary, so nesting and mismatches are common.
#[derive(Debug, Clone)]
struct Markup(String);

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 40;
        let markup = (0..len)
            .filter_map(|_| g.choose(FRAGMENTS).copied())
            .collect();
        Self(markup)
    }
}

fn contains(ancestor: &Node, node: &Node) -> bool {
    ancestor.depth_first().skip(1).any(|n| std::ptr::eq(n, node))
}

#[quickcheck]
fn document_is_always_returned(markup: Markup) -> bool {
    parse(markup.0.as_bytes()).document.kind == NodeKind::Document
}

#[quickcheck]
fn pruned_matches_are_unnested(markup: Markup) -> bool {
    let parsed = parse(markup.0.as_bytes());
    let pruned = parsed.document.find_all("div", true);
    pruned
        .iter()
        .all(|a| pruned.iter().all(|b| !contains(a, b)))
}

#[quickcheck]
fn pruned_matches_are_a_subset(markup: Markup) -> bool {
    let parsed = parse(markup.0.as_bytes());
    let all = parsed.document.find_all("span", false);
    let pruned = parsed.document.find_all("span", true);
    pruned.len() <= all.len()
        && pruned
            .iter()
            .all(|p| all.iter().any(|a| std::ptr::eq(*a, *p)))
}

#[quickcheck]
fn find_agrees_with_find_all(markup: Markup) -> bool {
    let parsed = parse(markup.0.as_bytes());
    let first = parsed.document.find("p");
    match parsed.document.find_all("p", false).first() {
        Some(node) => std::ptr::eq(*node, first),
        None => first.is_invalid(),
    }
}

#[quickcheck]
fn void_elements_have_no_children(markup: Markup) -> bool {
    let parsed = parse(markup.0.as_bytes());
    parsed
        .document
        .depth_first()
        .filter(|n| n.is_named("br") || n.is_named("img"))
        .all(|n| n.children.is_empty())
}
