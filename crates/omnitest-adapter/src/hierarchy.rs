use crate::model::{ClassNode, MethodNode, Project, ProjectNode, LINE_OFFSET};
use indexmap::IndexMap;
use omnitest_protocol::TestInfo;
use std::path::Path;

/// Groups a flat discovery result into the project's three-level tree.
///
/// Tests sharing a source file become one class, labeled after the file's
/// basename. Class order follows the first occurrence of each file in
/// `tests`, and methods keep their discovery order, so the same input always
/// produces the same display order.
///
/// Returns `None` when discovery reported nothing, so callers keep the
/// last-known-good tree instead of clobbering it with an empty one.
pub fn build(project: &Project, tests: &[TestInfo]) -> Option<ProjectNode> {
    if tests.is_empty() {
        return None;
    }

    let mut by_file: IndexMap<&str, Vec<&TestInfo>> = IndexMap::new();
    for test in tests {
        by_file
            .entry(test.code_file_path.as_str())
            .or_default()
            .push(test);
    }

    let children = by_file
        .into_iter()
        .map(|(file, group)| {
            let label = class_label(file);
            let class_id = format!("{}:{}", project.name, label);
            let methods = group
                .into_iter()
                .map(|test| MethodNode {
                    id: format!("{}:{}", class_id, test.fully_qualified_name),
                    label: test.display_name.clone(),
                    file: test.code_file_path.clone(),
                    line: test.line_number - LINE_OFFSET,
                    full_name: test.fully_qualified_name.clone(),
                    assembly: project.name.clone(),
                })
                .collect();

            ClassNode {
                id: class_id,
                label,
                tooltip: file.to_string(),
                file: file.to_string(),
                line: 0,
                children: methods,
            }
        })
        .collect();

    Some(ProjectNode {
        id: project.name.clone(),
        label: project.name.clone(),
        file: project.path.clone(),
        line: 0,
        children,
    })
}

fn class_label(file: &str) -> String {
    let name = Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.strip_suffix(".cs").unwrap_or(name.as_ref()).to_string()
}
