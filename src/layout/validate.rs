use super::*;

/// Checks that `spans` form a forest listed parents-first.
///
/// A parent listed after its child is rejected, which also rules out cycles:
/// every span in a cycle would need to follow its own descendant.
pub fn validate_trace(spans: &[Span], policy: RootPolicy) -> Result<(), StructureError> {
    let Some(first) = spans.first() else {
        return Err(StructureError::Empty);
    };

    let min_start = spans
        .iter()
        .map(|span| span.start_time)
        .min()
        .unwrap_or(first.start_time);

    let mut rows: HashMap<&str, usize> = HashMap::with_capacity(spans.len());
    for (row, span) in spans.iter().enumerate() {
        if let Some(&first_row) = rows.get(span.id.as_str()) {
            return Err(StructureError::DuplicateId {
                id: span.id.clone(),
                first: first_row,
                second: row,
            });
        }
        rows.insert(span.id.as_str(), row);
        if span.end_time < span.start_time {
            return Err(StructureError::NegativeDuration {
                id: span.id.clone(),
                start: span.start_time,
                end: span.end_time,
            });
        }
        let measurable = span.end_time.checked_sub(span.start_time).is_some()
            && span.end_time.checked_sub(min_start).is_some();
        if !measurable {
            return Err(StructureError::TimeOutOfRange {
                id: span.id.clone(),
                start: span.start_time,
                end: span.end_time,
            });
        }
    }

    if let Some(parent) = &first.parent_id {
        if !rows.contains_key(parent.as_str()) {
            return Err(StructureError::DanglingParent {
                id: first.id.clone(),
                parent: parent.clone(),
            });
        }
        return Err(StructureError::MissingRoot {
            id: first.id.clone(),
        });
    }

    let mut roots = 0usize;
    for (row, span) in spans.iter().enumerate() {
        let Some(parent) = &span.parent_id else {
            roots += 1;
            continue;
        };
        match rows.get(parent.as_str()) {
            None => {
                return Err(StructureError::DanglingParent {
                    id: span.id.clone(),
                    parent: parent.clone(),
                });
            }
            Some(&parent_row) if parent_row >= row => {
                return Err(StructureError::ParentAfterChild {
                    id: span.id.clone(),
                    parent: parent.clone(),
                    child_row: row,
                    parent_row,
                });
            }
            Some(_) => {}
        }
    }

    if roots > 1 && policy == RootPolicy::Reject {
        return Err(StructureError::MultipleRoots { count: roots });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_parent_first_tree() {
        let spans = vec![
            Span::new("1", None, 0, 10, "", "A"),
            Span::new("2", Some("1"), 1, 5, "", "A"),
            Span::new("3", Some("2"), 2, 3, "", "B"),
        ];
        assert_eq!(validate_trace(&spans, RootPolicy::Reject), Ok(()));
    }

    #[test]
    fn rejects_empty_trace() {
        assert_eq!(
            validate_trace(&[], RootPolicy::Disconnected),
            Err(StructureError::Empty)
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let spans = vec![
            Span::new("1", None, 0, 10, "", "A"),
            Span::new("1", None, 0, 10, "", "A"),
        ];
        assert!(matches!(
            validate_trace(&spans, RootPolicy::Disconnected),
            Err(StructureError::DuplicateId { first: 0, second: 1, .. })
        ));
    }

    #[test]
    fn rejects_dangling_parent() {
        let spans = vec![
            Span::new("1", None, 0, 10, "", "A"),
            Span::new("2", Some("9"), 1, 2, "", "A"),
        ];
        assert_eq!(
            validate_trace(&spans, RootPolicy::Disconnected),
            Err(StructureError::DanglingParent {
                id: "2".to_string(),
                parent: "9".to_string()
            })
        );
    }

    #[test]
    fn rejects_cycles_as_out_of_order() {
        let spans = vec![
            Span::new("r", None, 0, 10, "", "A"),
            Span::new("a", Some("b"), 1, 2, "", "A"),
            Span::new("b", Some("a"), 1, 2, "", "A"),
        ];
        assert!(matches!(
            validate_trace(&spans, RootPolicy::Disconnected),
            Err(StructureError::ParentAfterChild { child_row: 1, parent_row: 2, .. })
        ));
    }

    #[test]
    fn rejects_self_parent() {
        let spans = vec![
            Span::new("r", None, 0, 10, "", "A"),
            Span::new("a", Some("a"), 1, 2, "", "A"),
        ];
        assert!(matches!(
            validate_trace(&spans, RootPolicy::Disconnected),
            Err(StructureError::ParentAfterChild { .. })
        ));
    }

    #[test]
    fn first_row_must_be_root() {
        let spans = vec![
            Span::new("2", Some("1"), 1, 2, "", "A"),
            Span::new("1", None, 0, 10, "", "A"),
        ];
        assert_eq!(
            validate_trace(&spans, RootPolicy::Disconnected),
            Err(StructureError::MissingRoot { id: "2".to_string() })
        );
    }

    #[test]
    fn root_policy_controls_extra_roots() {
        let spans = vec![
            Span::new("1", None, 0, 10, "", "A"),
            Span::new("2", None, 12, 20, "", "B"),
        ];
        assert_eq!(validate_trace(&spans, RootPolicy::Disconnected), Ok(()));
        assert_eq!(
            validate_trace(&spans, RootPolicy::Reject),
            Err(StructureError::MultipleRoots { count: 2 })
        );
    }

    #[test]
    fn rejects_negative_duration() {
        let spans = vec![Span::new("1", None, 10, 5, "", "A")];
        assert!(matches!(
            validate_trace(&spans, RootPolicy::Disconnected),
            Err(StructureError::NegativeDuration { start: 10, end: 5, .. })
        ));
    }

    #[test]
    fn rejects_span_wider_than_the_time_range() {
        let spans = vec![Span::new(
            "1",
            None,
            -9_000_000_000_000_000_000,
            9_000_000_000_000_000_000,
            "",
            "A",
        )];
        assert!(matches!(
            validate_trace(&spans, RootPolicy::Disconnected),
            Err(StructureError::TimeOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_end_too_far_from_earliest_start() {
        let spans = vec![
            Span::new("1", None, TimeMs::MIN, TimeMs::MIN + 10, "", "A"),
            Span::new("2", Some("1"), TimeMs::MAX - 10, TimeMs::MAX, "", "A"),
        ];
        assert_eq!(
            validate_trace(&spans, RootPolicy::Disconnected),
            Err(StructureError::TimeOutOfRange {
                id: "2".to_string(),
                start: TimeMs::MAX - 10,
                end: TimeMs::MAX,
            })
        );
    }
}
