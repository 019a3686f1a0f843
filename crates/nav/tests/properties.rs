//! Property tests for the resolver and the navigation state machine.

use std::sync::Arc;

use folio_nav::{MenuTree, NavigationShell, ShellOptions, resolve};
use folio_types::{DisplayPreferences, MenuEntry, SubmenuPolicy};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Route(String),
    Activate(String),
    Header,
    Escape,
}

/// Sections `/s0..`, each with `children[i]` leaves `/sN/cM`.
fn build_tree(children: &[usize]) -> MenuTree {
    let entries = children
        .iter()
        .enumerate()
        .map(|(section, &count)| {
            let id = format!("s{section}");
            let kids = (0..count)
                .map(|child| {
                    MenuEntry::child(
                        id.clone(),
                        format!("s{section}c{child}"),
                        format!("Child {child}"),
                        format!("/s{section}/c{child}"),
                        child as i32,
                    )
                })
                .collect();
            MenuEntry::top(id.clone(), format!("Section {section}"), format!("/{id}"), section as i32).with_children(kids)
        })
        .collect();
    MenuTree::from_entries(entries).expect("generated tree is valid")
}

fn path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        (0..6usize).prop_map(|s| format!("/s{s}")),
        (0..6usize, 0..4usize).prop_map(|(s, c)| format!("/s{s}/c{c}")),
        (0..6usize, 0..4usize).prop_map(|(s, c)| format!("/s{s}/c{c}/detail")),
        "[a-z/]{0,12}",
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        path_strategy().prop_map(Op::Route),
        (0..6usize).prop_map(|s| Op::Activate(format!("s{s}"))),
        (0..6usize, 0..4usize).prop_map(|(s, c)| Op::Activate(format!("s{s}c{c}"))),
        Just(Op::Header),
        Just(Op::Escape),
    ]
}

fn policy_strategy() -> impl Strategy<Value = SubmenuPolicy> {
    prop_oneof![Just(SubmenuPolicy::FollowRoute), Just(SubmenuPolicy::PersistToggle)]
}

fn apply(shell: &mut NavigationShell, op: &Op) {
    match op {
        Op::Route(path) => {
            shell.route_changed(path);
        }
        Op::Activate(id) => {
            shell.activate(id);
        }
        Op::Header => {
            shell.activate_header();
        }
        Op::Escape => {
            shell.escape();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn resolve_is_deterministic(
        children in proptest::collection::vec(0..4usize, 1..6),
        path in path_strategy(),
    ) {
        let tree = build_tree(&children);
        let first = resolve(&tree, &path);
        let second = resolve(&build_tree(&children), &path);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn state_invariants_hold_after_any_sequence(
        children in proptest::collection::vec(0..4usize, 1..6),
        start in path_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..24),
        policy in policy_strategy(),
    ) {
        let tree = Arc::new(build_tree(&children));
        let options = ShellOptions { policy, ..ShellOptions::default() };
        let mut shell = NavigationShell::mount(tree.clone(), &start, DisplayPreferences::default(), options);

        for op in &ops {
            apply(&mut shell, op);

            // an open submenu always belongs to a parent entry
            if let Some(id) = shell.state().expanded_submenu_id() {
                let entry = tree.get(id);
                prop_assert!(entry.is_some_and(|entry| entry.has_children()), "submenu {} has no children", id);
            }
            // the active entry is a pure function of the route
            let resolved = resolve(&tree, shell.current_route());
            prop_assert_eq!(shell.state().active_entry_id(), resolved.active_entry_id.as_deref());
            if !shell.state().expanded() {
                prop_assert!(shell.state().visible_submenu_id().is_none());
            }
        }
    }

    #[test]
    fn repeated_route_notification_changes_nothing(
        children in proptest::collection::vec(0..4usize, 1..6),
        ops in proptest::collection::vec(op_strategy(), 0..12),
        path in path_strategy(),
        policy in policy_strategy(),
    ) {
        let tree = Arc::new(build_tree(&children));
        let options = ShellOptions { policy, ..ShellOptions::default() };
        let mut shell = NavigationShell::mount(tree, "/", DisplayPreferences::default(), options);
        for op in &ops {
            apply(&mut shell, op);
        }

        shell.route_changed(&path);
        let once = shell.state().clone();
        shell.route_changed(&path);
        prop_assert_eq!(shell.state(), &once);
    }
}
