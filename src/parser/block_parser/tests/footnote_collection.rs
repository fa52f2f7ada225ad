use crate::ast::Block;
use crate::config::Options;
use crate::lines::classify;
use crate::parser::block_parser::BlockParser;

use super::helpers::parse_doc;

#[test]
fn definition_goes_to_table_not_tree() {
    let (blocks, footnotes, _) = parse_doc("para[^1]\n\n[^1]: the note\n");
    assert_eq!(blocks.len(), 1, "definition must not appear in the tree");
    let def = footnotes.get("1").unwrap();
    assert_eq!(
        def.blocks,
        vec![Block::Paragraph {
            text: "the note".to_string()
        }]
    );
}

#[test]
fn multi_paragraph_definition() {
    let (_, footnotes, _) = parse_doc("[^a]: first\n\n    second\n");
    let def = footnotes.get("a").unwrap();
    assert_eq!(def.blocks.len(), 2);
}

#[test]
fn definition_body_can_hold_a_list() {
    let (_, footnotes, _) = parse_doc("[^a]: intro\n\n    - one\n    - two\n");
    let def = footnotes.get("a").unwrap();
    assert!(matches!(def.blocks[1], Block::List { .. }));
}

#[test]
fn duplicate_label_first_wins() {
    let (_, footnotes, _) = parse_doc("[^x]: first\n\n[^x]: second\n");
    assert_eq!(footnotes.len(), 1);
    let def = footnotes.get("x").unwrap();
    assert_eq!(
        def.blocks,
        vec![Block::Paragraph {
            text: "first".to_string()
        }]
    );
}

#[test]
fn labels_are_case_insensitive() {
    let (_, footnotes, _) = parse_doc("[^Note]: body\n");
    assert!(footnotes.contains("note"));
    assert!(footnotes.contains("NOTE"));
}

#[test]
fn disabled_footnotes_leave_definition_as_text() {
    let options = Options::base();
    let lines = classify("[^1]: note\n");
    let (blocks, footnotes, _) = BlockParser::new(&options).parse(&lines);
    assert!(footnotes.is_empty());
    assert_eq!(
        blocks,
        vec![Block::Paragraph {
            text: "[^1]: note".to_string()
        }]
    );
}
