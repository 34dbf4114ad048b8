//! Tests for tree mutation: add, remove, replace, reparent and cycle rejection

use rstest::{fixture, rstest};

use formtree::{
    BindingPolicy, BranchRenderer, CompositeFlavor, DomainError, LeafFlavor, NodeId, NodeTree,
};

struct Form {
    tree: NodeTree,
    form: NodeId,
    name: NodeId,
    email: NodeId,
}

#[fixture]
fn form() -> Form {
    let mut tree = NodeTree::new();
    let form = tree.composite("form", CompositeFlavor::Branch);
    let name = tree.leaf("name", LeafFlavor::input("Name", "text"));
    let email = tree.leaf("email", LeafFlavor::input("Email", "email"));
    tree.add(form, name).unwrap();
    tree.add(form, email).unwrap();
    Form {
        tree,
        form,
        name,
        email,
    }
}

fn child_names(tree: &NodeTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .unwrap()
        .iter()
        .map(|&c| tree.name(c).unwrap().to_string())
        .collect()
}

// ============================================================
// Attach / detach
// ============================================================

#[rstest]
fn given_new_nodes_when_created_then_detached(mut form: Form) {
    let loose = form.tree.leaf("loose", LeafFlavor::Item);
    assert_eq!(form.tree.parent(loose).unwrap(), None);
    assert!(!form.tree.is_composite(loose).unwrap());
    assert!(form.tree.is_composite(form.form).unwrap());
}

#[rstest]
fn given_composite_when_adding_children_then_sets_parent_and_keeps_order(form: Form) {
    assert_eq!(form.tree.parent(form.name).unwrap(), Some(form.form));
    assert_eq!(form.tree.parent(form.email).unwrap(), Some(form.form));
    assert_eq!(child_names(&form.tree, form.form), ["name", "email"]);
}

#[rstest]
fn given_add_then_remove_when_round_trip_then_restores_prior_state(mut form: Form) {
    let phone = form.tree.leaf("phone", LeafFlavor::Item);
    let before = form.tree.children(form.form).unwrap().to_vec();

    form.tree.add(form.form, phone).unwrap();
    form.tree.remove(form.form, phone).unwrap();

    assert_eq!(form.tree.children(form.form).unwrap(), before.as_slice());
    assert_eq!(form.tree.parent(phone).unwrap(), None);
}

#[rstest]
fn given_non_child_when_removing_then_no_op(mut form: Form) {
    let stranger = form.tree.leaf("stranger", LeafFlavor::Item);

    form.tree.remove(form.form, stranger).unwrap();
    form.tree.remove(form.form, form.name).unwrap();
    form.tree.remove(form.form, form.name).unwrap();

    assert_eq!(child_names(&form.tree, form.form), ["email"]);
    assert_eq!(form.tree.parent(stranger).unwrap(), None);
}

#[rstest]
fn given_removed_child_when_handle_held_then_survives_as_orphan(mut form: Form) {
    form.tree.remove(form.form, form.name).unwrap();

    assert!(form.tree.contains(form.name));
    assert!(form.tree.roots().contains(&form.name));
}

#[rstest]
fn given_leaf_when_removing_then_not_composite(mut form: Form) {
    let err = form.tree.remove(form.name, form.email).unwrap_err();
    assert_eq!(err, DomainError::NotComposite("name".into()));
}

// ============================================================
// Same-name replacement
// ============================================================

#[rstest]
fn given_same_name_when_adding_then_replaces_in_place(mut form: Form) {
    let other_name = form.tree.leaf("name", LeafFlavor::Item);

    form.tree.add(form.form, other_name).unwrap();

    assert_eq!(
        form.tree.children(form.form).unwrap(),
        &[other_name, form.email]
    );
    assert_eq!(form.tree.parent(form.name).unwrap(), None);
    assert_eq!(form.tree.parent(other_name).unwrap(), Some(form.form));
}

#[test]
fn given_reject_policy_when_adding_same_name_then_errors_and_keeps_tree() {
    let mut tree = NodeTree::with_policy(BindingPolicy::strict());
    let form = tree.composite("form", CompositeFlavor::Branch);
    let first = tree.leaf("name", LeafFlavor::Item);
    let second = tree.leaf("name", LeafFlavor::Item);
    tree.add(form, first).unwrap();

    let err = tree.add(form, second).unwrap_err();

    assert_eq!(
        err,
        DomainError::DuplicateName {
            parent: "form".into(),
            name: "name".into(),
        }
    );
    assert_eq!(tree.children(form).unwrap(), &[first]);
    assert_eq!(tree.parent(second).unwrap(), None);
}

// ============================================================
// Cycles
// ============================================================

#[rstest]
fn given_composite_when_adding_itself_then_cycle(mut form: Form) {
    let err = form.tree.add(form.form, form.form).unwrap_err();
    assert!(matches!(err, DomainError::Cycle { .. }));
    assert_eq!(form.tree.parent(form.form).unwrap(), None);
}

#[test]
fn given_nested_composites_when_adding_ancestor_then_cycle_and_tree_unchanged() {
    let mut tree = NodeTree::new();
    let outer = tree.composite("outer", CompositeFlavor::Branch);
    let middle = tree.composite("middle", CompositeFlavor::Branch);
    let inner = tree.composite("inner", CompositeFlavor::Branch);
    tree.add(outer, middle).unwrap();
    tree.add(middle, inner).unwrap();
    let before = tree.render_with(outer, &BranchRenderer).unwrap();

    let err = tree.add(inner, outer).unwrap_err();

    assert_eq!(
        err,
        DomainError::Cycle {
            child: "outer".into(),
            parent: "inner".into(),
        }
    );
    assert_eq!(tree.parent(outer).unwrap(), None);
    assert_eq!(tree.children(inner).unwrap(), &[] as &[NodeId]);
    assert_eq!(tree.render_with(outer, &BranchRenderer).unwrap(), before);
}

// ============================================================
// Reparent / discard
// ============================================================

#[rstest]
fn given_attached_child_when_reparented_then_leaves_old_parent(mut form: Form) {
    let contact = form.tree.composite("contact", CompositeFlavor::fieldset("Contact"));
    form.tree.add(form.form, contact).unwrap();

    form.tree.add(contact, form.email).unwrap();

    assert_eq!(child_names(&form.tree, form.form), ["name", "contact"]);
    assert_eq!(child_names(&form.tree, contact), ["email"]);
    assert_eq!(form.tree.find(form.form, "contact/email").unwrap(), Some(form.email));
}

#[rstest]
fn given_root_when_discarded_then_whole_subtree_released(mut form: Form) {
    let before = form.tree.len();

    let released = form.tree.discard(form.form).unwrap();

    assert_eq!(released, 3);
    assert_eq!(form.tree.len(), before - 3);
    assert!(!form.tree.contains(form.email));
    assert!(matches!(
        form.tree.add(form.form, form.email),
        Err(DomainError::NodeNotFound(_))
    ));
}
