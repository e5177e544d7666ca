//! Expression synthesis: renders a signal chain as boolean expression text.
//!
//! Each node contributes its current truth value as a `true`/`false` literal, followed
//! by the connective for its operator when a successor exists. Inclusive operators open
//! a parenthesis before the node's literal; the group closes right after the successor's
//! literal. Negating operators put `!` in front of the successor, so `A NOT B` renders as
//! `a and !b`.

use crate::domain::operator::Operator;
use crate::domain::signal::SignalNode;

/// Render a chain using each node's current `evaluate()`.
pub fn synthesize(nodes: &[SignalNode]) -> String {
    let links: Vec<(bool, Option<Operator>)> = nodes
        .iter()
        .map(|node| (node.evaluate(), node.operator()))
        .collect();
    render(&links)
}

/// Render `(value, operator)` pairs in chain order. The last operator is ignored.
pub fn render(links: &[(bool, Option<Operator>)]) -> String {
    let mut out = String::new();
    let mut close_group = false;

    for (i, &(value, operator)) in links.iter().enumerate() {
        let operator = if i + 1 < links.len() { operator } else { None };
        let opens_group = operator.is_some_and(Operator::is_inclusive);

        if opens_group {
            out.push('(');
        }
        out.push_str(if value { "true" } else { "false" });
        if close_group {
            out.push(')');
        }
        if let Some(op) = operator {
            out.push_str(op.connective());
        }

        close_group = opens_group;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use Operator::*;

    #[test]
    fn single_literal() {
        assert_eq!(render(&[(true, None)]), "true");
        assert_eq!(render(&[(false, None)]), "false");
    }

    #[test]
    fn empty_chain_renders_nothing() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn terminal_operator_ignored() {
        assert_eq!(render(&[(true, Some(OrInclusive))]), "true");
        assert_eq!(render(&[(true, Some(And)), (false, Some(Nor))]), "true and false");
    }

    #[test]
    fn plain_connectives() {
        assert_eq!(
            render(&[(true, Some(And)), (false, Some(Or)), (true, None)]),
            "true and false or true"
        );
    }

    #[test]
    fn negation_targets_successor() {
        assert_eq!(
            render(&[(true, Some(And)), (true, Some(Not)), (true, None)]),
            "true and true and !true"
        );
        assert_eq!(
            render(&[(true, Some(And)), (true, Some(Nor)), (false, None)]),
            "true and true or !false"
        );
    }

    #[test]
    fn inclusive_groups_with_successor() {
        assert_eq!(
            render(&[(true, Some(And)), (false, Some(OrInclusive)), (true, None)]),
            "true and (false or true)"
        );
        assert_eq!(
            render(&[(false, Some(NorInclusive)), (false, None)]),
            "(false or !false)"
        );
    }

    #[test]
    fn consecutive_inclusive_nest() {
        assert_eq!(
            render(&[
                (true, Some(OrInclusive)),
                (true, Some(OrInclusive)),
                (true, None)
            ]),
            "(true or (true) or true)"
        );
    }

    #[test]
    fn negation_before_group_negates_group() {
        assert_eq!(
            render(&[(true, Some(Not)), (true, Some(OrInclusive)), (false, None)]),
            "true and !(true or false)"
        );
    }

    #[test]
    fn parentheses_always_balance() {
        for a in Operator::ALL {
            for b in Operator::ALL {
                for c in Operator::ALL {
                    let text = render(&[
                        (true, Some(a)),
                        (false, Some(b)),
                        (true, Some(c)),
                        (false, None),
                    ]);
                    let opens = text.matches('(').count();
                    let closes = text.matches(')').count();
                    assert_eq!(opens, closes, "unbalanced: {text}");
                }
            }
        }
    }
}
