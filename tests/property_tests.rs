use std::path::Path;

use proptest::prelude::*;

use cogmet::analyzers::cognitive::{Analyzer, Severity};
use cogmet::config::CognitiveConfig;
use cogmet::scorer::Scorer;
use cogmet::syntax::{NodeKind, TreeBuilder};

// ---------------------------------------------------------------------------
// Scorer properties over hand-built trees
// ---------------------------------------------------------------------------

proptest! {
    /// Wrapping a body in additional nesting constructs strictly increases
    /// the score, one extra level at a time.
    #[test]
    fn wrapping_monotonically_increases_score(depth in 0usize..8) {
        let build = |levels: usize| {
            let mut builder = TreeBuilder::new(NodeKind::Method);
            let mut parent = builder.root();
            for _ in 0..levels {
                parent = builder.push(NodeKind::If, parent);
            }
            builder.push(NodeKind::While, parent);
            builder.finish()
        };

        let shallow = build(depth);
        let deeper = build(depth + 1);

        let mut scorer = Scorer::new();
        let shallow_score = scorer.score(&shallow, shallow.root());
        let deeper_score = scorer.score(&deeper, deeper.root());
        prop_assert!(deeper_score > shallow_score);
    }

    /// A pile of flat (unnested) constructs scores exactly one per
    /// construct: no nesting means no extra weight.
    #[test]
    fn flat_constructs_cost_one_each(count in 0usize..32) {
        let mut builder = TreeBuilder::new(NodeKind::Method);
        let root = builder.root();
        for _ in 0..count {
            builder.push(NodeKind::If, root);
        }
        let tree = builder.finish();

        let mut scorer = Scorer::new();
        prop_assert_eq!(scorer.score(&tree, tree.root()), count as u32);
    }

    /// Scoring is idempotent and a reused scorer never leaks state into a
    /// later empty method.
    #[test]
    fn reuse_never_leaks(kinds in prop::collection::vec(
        prop_oneof![
            Just(NodeKind::If),
            Just(NodeKind::For),
            Just(NodeKind::While),
            Just(NodeKind::Switch),
            Just(NodeKind::Continue),
            Just(NodeKind::Conditional),
        ],
        0..16,
    )) {
        let mut builder = TreeBuilder::new(NodeKind::Method);
        let mut parent = builder.root();
        for kind in kinds {
            parent = builder.push(kind, parent);
        }
        let tree = builder.finish();

        let mut empty = TreeBuilder::new(NodeKind::Method);
        let empty_root = empty.root();
        empty.push(NodeKind::Other, empty_root);
        let empty = empty.finish();

        let mut scorer = Scorer::new();
        let first = scorer.score(&tree, tree.root());
        let second = scorer.score(&tree, tree.root());
        prop_assert_eq!(first, second);
        prop_assert_eq!(scorer.score(&empty, empty.root()), 0);
    }
}

// ---------------------------------------------------------------------------
// End-to-end properties over generated C# sources
// ---------------------------------------------------------------------------

proptest! {
    /// Arbitrary statement soups parse and score without panicking, and
    /// severities always agree with scores under the default config.
    #[test]
    fn generated_sources_score_consistently(
        statements in prop::collection::vec(
            prop_oneof![
                Just("int x = 1;"),
                Just("if (a) { x++; }"),
                Just("while (a) { break; }"),
                Just("for (int i = 0; i < 3; i++) { continue; }"),
                Just("bool t = a && b || a;"),
                Just("int y = a ? 1 : 2;"),
                Just("try { x++; } catch (System.Exception e) { }"),
                Just("switch (x) { case 0: break; default: break; }"),
            ],
            0..10,
        )
    ) {
        let body = statements.join("\n        ");
        let code = format!(
            "class P {{\n    void M(bool a, bool b) {{\n        int x = 0;\n        {}\n    }}\n}}\n",
            body
        );

        let cfg = CognitiveConfig::default();
        let analyzer = Analyzer::new();
        let result = analyzer
            .analyze_content(Path::new("P.cs"), code.clone().into_bytes(), &cfg)
            .expect("analysis failed");

        for func in &result.functions {
            let expected = Severity::classify(func.score, &cfg);
            prop_assert_eq!(func.severity, expected);
        }

        // Deterministic: a second run over the same content agrees.
        let again = analyzer
            .analyze_content(Path::new("P.cs"), code.into_bytes(), &cfg)
            .expect("analysis failed");
        let scores: Vec<u32> = result.functions.iter().map(|f| f.score).collect();
        let again_scores: Vec<u32> = again.functions.iter().map(|f| f.score).collect();
        prop_assert_eq!(scores, again_scores);
    }

    /// Nested ifs at depth d score 1 + 2 + ... + d.
    #[test]
    fn nested_ifs_follow_triangular_costs(depth in 1u32..7) {
        let mut body = String::new();
        for i in 0..depth {
            let indent = "    ".repeat(i as usize + 2);
            body.push_str(&format!("{}if (x > {}) {{\n", indent, i));
        }
        for i in (0..depth).rev() {
            let indent = "    ".repeat(i as usize + 2);
            body.push_str(&format!("{}}}\n", indent));
        }
        let code = format!("class P {{\n    void M(int x) {{\n{}    }}\n}}\n", body);

        let analyzer = Analyzer::new();
        let result = analyzer
            .analyze_content(
                Path::new("P.cs"),
                code.into_bytes(),
                &CognitiveConfig::default(),
            )
            .expect("analysis failed");

        prop_assert_eq!(result.functions.len(), 1);
        let expected = depth * (depth + 1) / 2;
        prop_assert_eq!(result.functions[0].score, expected);
    }
}
