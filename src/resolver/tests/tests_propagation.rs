#![allow(clippy::unwrap_used)]

use crate::classfile::ClassFile;
use crate::graph::GraphBuilder;
use crate::resolver::ClassPropagationTree;

#[test]
fn test_tree_covers_connected_component() {
    let graph = GraphBuilder::build([
        ClassFile::new("a"),
        ClassFile::new("b").with_super("a"),
        ClassFile::new("c").with_super("a").with_interface("i"),
        ClassFile::new("i"),
        ClassFile::new("d").with_interface("i"),
        ClassFile::new("lonely"),
    ]);

    let seed = graph.id_of("b").unwrap();
    let tree = ClassPropagationTree::new(&graph, seed);

    assert_eq!(tree.classes()[0], seed);
    assert_eq!(tree.len(), 5);
    assert!(!tree.contains(graph.id_of("lonely").unwrap()));

    let names = |ids: Vec<_>| -> Vec<String> {
        ids.into_iter()
            .map(|id| graph.class(id).name.clone())
            .collect()
    };
    assert_eq!(names(tree.sorted_by_name(&graph)), ["a", "b", "c", "d", "i"]);

    let mut topmost = names(tree.topmost().to_vec());
    topmost.sort();
    assert_eq!(topmost, ["a", "i"]);

    let mut leaves = names(tree.leaves().to_vec());
    leaves.sort();
    assert_eq!(leaves, ["b", "c", "d"]);
}

#[test]
fn test_isolated_class_is_own_tree() {
    let graph = GraphBuilder::build([ClassFile::new("a").with_super("java/lang/Object")]);
    let tree = ClassPropagationTree::new(&graph, graph.id_of("a").unwrap());
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.topmost(), tree.classes());
    assert_eq!(tree.leaves(), tree.classes());
}
