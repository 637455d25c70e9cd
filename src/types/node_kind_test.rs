//! Tests for `NodeKind`.

use super::NodeKind;

#[test]
fn default_titles_per_kind() {
  assert_eq!(NodeKind::Process.default_title(), "New node");
  assert_eq!(NodeKind::Decision.default_title(), "Decision point");
  assert_eq!(NodeKind::Start.default_title(), "Start");
  assert_eq!(NodeKind::End.default_title(), "End");
  assert_eq!(NodeKind::Note.default_title(), "Note");
}

#[test]
fn parse_is_case_insensitive() {
  assert_eq!("Decision".parse::<NodeKind>().unwrap(), NodeKind::Decision);
  assert_eq!(" note ".parse::<NodeKind>().unwrap(), NodeKind::Note);
  assert!("diamond".parse::<NodeKind>().is_err());
}

#[test]
fn serializes_lowercase() {
  let json = serde_json::to_string(&NodeKind::End).unwrap();
  assert_eq!(json, "\"end\"");
  let kind: NodeKind = serde_json::from_str("\"start\"").unwrap();
  assert_eq!(kind, NodeKind::Start);
}
