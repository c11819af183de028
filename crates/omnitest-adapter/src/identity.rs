use crate::model::{ClassNode, MethodNode, ProjectNode, SuiteNode};
use indexmap::IndexMap;
use std::collections::HashMap;

/// The global indexes over the three-level tree.
///
/// All four maps are rebuilt together per project on every successful
/// discovery ([`TestIndex::insert_project`]), so the fully-qualified-name
/// reverse path can never point at a node the forward tree does not hold a
/// newer version of. Entries for tests that disappeared between discovery
/// cycles are not purged; they persist until the next workspace update (or
/// process restart) and are overwritten on id collision. The UI tolerates
/// stale ids, so lookups stay best-effort.
#[derive(Debug, Default)]
pub struct TestIndex {
    /// Insertion order is the published suite's child order.
    projects: IndexMap<String, ProjectNode>,
    classes: HashMap<String, ClassNode>,
    methods: HashMap<String, MethodNode>,
    /// Fully-qualified name → method id; the unique reverse path from a
    /// backend event to a UI node.
    by_full_name: HashMap<String, String>,
}

impl TestIndex {
    /// Registers (or replaces) one project's tree and all derived lookups.
    pub fn insert_project(&mut self, node: ProjectNode) {
        for class in &node.children {
            for method in &class.children {
                self.by_full_name
                    .insert(method.full_name.clone(), method.id.clone());
                self.methods.insert(method.id.clone(), method.clone());
            }
            self.classes.insert(class.id.clone(), class.clone());
        }
        self.projects.insert(node.id.clone(), node);
    }

    /// Discards everything; used when the workspace is rebuilt from scratch.
    pub fn clear(&mut self) {
        self.projects.clear();
        self.classes.clear();
        self.methods.clear();
        self.by_full_name.clear();
    }

    /// Resolves a list of UI-selected ids to concrete test methods.
    ///
    /// The singleton `[""]` is the run-all sentinel and expands to every
    /// method in the tree. Otherwise each id's colon count picks its level:
    /// zero for a project (expands to all its methods), one for a class, two
    /// for a method. Unknown ids are skipped without error; the UI may hold
    /// ids from a previous tree generation.
    pub fn resolve(&self, ids: &[String]) -> Vec<&MethodNode> {
        if let [only] = ids {
            if only.is_empty() {
                return self.all_methods().collect();
            }
        }

        let mut methods = Vec::new();
        for id in ids {
            match id.matches(':').count() {
                0 => {
                    if let Some(project) = self.projects.get(id) {
                        for class in &project.children {
                            methods.extend(class.children.iter());
                        }
                    }
                }
                1 => {
                    if let Some(class) = self.classes.get(id) {
                        methods.extend(class.children.iter());
                    }
                }
                2 => {
                    if let Some(method) = self.methods.get(id) {
                        methods.push(method);
                    }
                }
                _ => tracing::debug!(%id, "ignoring id with more than two separators"),
            }
        }
        methods
    }

    /// Looks a method up by the backend's fully-qualified name. `None` is a
    /// recoverable condition (results may arrive for tests the index no
    /// longer knows); callers log and drop.
    pub fn method_by_full_name(&self, name: &str) -> Option<&MethodNode> {
        let id = self.by_full_name.get(name)?;
        self.methods.get(id)
    }

    /// The whole top-level tree, ready to publish to the UI.
    pub fn suite(&self) -> SuiteNode {
        SuiteNode {
            id: String::new(),
            label: String::new(),
            children: self.projects.values().cloned().collect(),
        }
    }

    fn all_methods(&self) -> impl Iterator<Item = &MethodNode> {
        self.projects
            .values()
            .flat_map(|project| project.children.iter())
            .flat_map(|class| class.children.iter())
    }
}
