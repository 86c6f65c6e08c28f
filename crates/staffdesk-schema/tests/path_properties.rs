use proptest::prelude::*;
use staffdesk_schema::{FieldPath, PathSegment};
use std::str::FromStr;

fn segment() -> impl Strategy<Value = PathSegment> {
    prop_oneof![
        r"[a-zA-Z0-9 .\[\]\\_-]{1,12}".prop_map(PathSegment::Key),
        any::<usize>().prop_map(PathSegment::Index),
    ]
}

fn build(segments: &[PathSegment]) -> FieldPath {
    segments
        .iter()
        .fold(FieldPath::root(), |path, segment| match segment {
            PathSegment::Key(key) => path.child(key.clone()),
            PathSegment::Index(index) => path.index(*index),
        })
}

proptest! {
    #[test]
    fn display_parses_back(segments in proptest::collection::vec(segment(), 0..6)) {
        let path = build(&segments);
        let text = path.to_string();
        prop_assert_eq!(FieldPath::from_str(&text), Ok(path));
    }

    #[test]
    fn distinct_paths_render_distinctly(
        a in proptest::collection::vec(segment(), 1..4),
        b in proptest::collection::vec(segment(), 1..4),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(build(&a).to_string(), build(&b).to_string());
    }

    #[test]
    fn parse_never_panics(text in r"[a-z0-9.\[\]\\]{0,24}") {
        let _ = FieldPath::from_str(&text);
    }
}
