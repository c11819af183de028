use crate::config::{AdapterConfig, ProjectFilter};
use crate::events::{AdapterEvent, TestLoadEvent, TestRunEvent, TestState};
use crate::hierarchy;
use crate::identity::TestIndex;
use crate::model::{MethodNode, Project, SuiteNode};
use crate::{AdapterError, Result};
use indexmap::IndexMap;
use omnitest_protocol::{
    BackendEvent, TestBackend, TestOutcome, TestResult, WorkspaceInformation, MSTEST_FRAMEWORK,
};
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LaunchMode {
    Run,
    Debug,
}

/// Receiving ends of the two channels exposed to the host UI.
pub struct AdapterChannels {
    pub load: UnboundedReceiver<TestLoadEvent>,
    pub state: UnboundedReceiver<TestRunEvent>,
}

/// The synchronization controller.
///
/// Owns the known-project set (keyed by project path, the stable identity
/// across refreshes) and the [`TestIndex`]; both are reachable only through
/// `&mut self` operations, so refresh cycles cannot interleave on them. Feed
/// external input through [`TestExplorerAdapter::drive`] (or
/// [`handle_event`](TestExplorerAdapter::handle_event)) to keep backend event
/// ordering intact.
pub struct TestExplorerAdapter<B> {
    backend: B,
    config: AdapterConfig,
    filter: ProjectFilter,
    projects: HashMap<String, Project>,
    index: TestIndex,
    load_tx: UnboundedSender<TestLoadEvent>,
    state_tx: UnboundedSender<TestRunEvent>,
}

impl<B: TestBackend> TestExplorerAdapter<B> {
    pub fn new(backend: B, config: AdapterConfig) -> Result<(Self, AdapterChannels)> {
        let filter = ProjectFilter::new(config.project_filters.as_deref())?;
        let (load_tx, load_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = mpsc::unbounded_channel();

        tracing::info!("initializing test adapter");
        let adapter = Self {
            backend,
            config,
            filter,
            projects: HashMap::new(),
            index: TestIndex::default(),
            load_tx,
            state_tx,
        };
        let channels = AdapterChannels {
            load: load_rx,
            state: state_rx,
        };
        Ok((adapter, channels))
    }

    /// The current tree, for the host's synchronous queries.
    pub fn suite(&self) -> SuiteNode {
        self.index.suite()
    }

    /// Processes queued events until the sender side closes.
    pub async fn drive(&mut self, events: &mut UnboundedReceiver<AdapterEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
    }

    pub async fn handle_event(&mut self, event: AdapterEvent) {
        match event {
            AdapterEvent::Backend(BackendEvent::WorkspaceInformationUpdated(info)) => {
                self.handle_workspace_information(&info).await;
            }
            AdapterEvent::Backend(BackendEvent::TestRunStarted { method_name }) => {
                self.handle_run_started(&method_name);
            }
            AdapterEvent::Backend(BackendEvent::TestResultsReported(results)) => {
                self.handle_test_results(&results);
            }
            AdapterEvent::BuildTaskFinished { category } => {
                if category.triggers_refresh() {
                    self.refresh().await;
                } else {
                    tracing::debug!(?category, "ignoring finished task");
                }
            }
            AdapterEvent::LoadRequested => self.load().await,
            AdapterEvent::RunRequested { tests } => self.run(&tests).await,
            AdapterEvent::DebugRequested { tests } => self.debug(&tests).await,
        }
    }

    /// Explicit load request from the host.
    pub async fn load(&mut self) {
        self.refresh().await;
    }

    /// Rebuilds the known-project set from both metadata shapes, then
    /// refreshes. The previous set and every derived index are discarded.
    pub async fn handle_workspace_information(&mut self, info: &WorkspaceInformation) {
        let mut projects = HashMap::new();

        if let Some(dotnet) = &info.dot_net {
            for metadata in &dotnet.projects {
                let Some(project) = Project::from_dotnet(metadata) else {
                    continue;
                };
                self.admit(&mut projects, project);
            }
        }
        if let Some(msbuild) = &info.ms_build {
            for metadata in &msbuild.projects {
                let Some(project) = Project::from_msbuild(metadata) else {
                    continue;
                };
                self.admit(&mut projects, project);
            }
        }

        tracing::info!(count = projects.len(), "workspace information updated");
        self.projects = projects;
        self.index.clear();
        self.refresh().await;
    }

    fn admit(&self, projects: &mut HashMap<String, Project>, project: Project) {
        if !self.filter.admits(&project.path) {
            tracing::debug!(project = %project.name, path = %project.path, "filtered out");
            return;
        }
        projects.insert(project.path.clone(), project);
    }

    /// One refresh cycle: staleness-gate every known project, re-discover the
    /// changed ones sequentially, and republish the tree.
    async fn refresh(&mut self) {
        tracing::info!("refreshing workspace");
        self.emit_load(TestLoadEvent::Started);

        let mut paths: Vec<String> = self.projects.keys().cloned().collect();
        paths.sort();

        for path in paths {
            let Some(project) = self.projects.get_mut(&path) else {
                continue;
            };
            let name = project.name.clone();
            let source_file = project.source_file.clone();

            let changed = match project.refresh_outputs() {
                Ok(changed) => changed,
                Err(err) => {
                    tracing::warn!(project = %name, error = %err, "failed to stat build outputs; skipping project");
                    continue;
                }
            };
            if !changed {
                tracing::info!(project = %name, "no change detected; skipping");
                continue;
            }

            tracing::info!(project = %name, "project changed; rediscovering tests");
            let tests = match self
                .backend
                .discover_tests(&source_file, MSTEST_FRAMEWORK, self.config.discovery_no_build)
                .await
            {
                Ok(tests) => tests,
                Err(err) => {
                    tracing::error!(project = %name, error = %err, "test discovery failed; aborting refresh");
                    break;
                }
            };
            tracing::info!(project = %name, count = tests.len(), "discovered tests");

            let Some(project) = self.projects.get(&path) else {
                continue;
            };
            if let Some(node) = hierarchy::build(project, &tests) {
                self.index.insert_project(node);
            }
        }

        self.emit_load(TestLoadEvent::Finished {
            suite: self.index.suite(),
        });
    }

    pub async fn run(&self, tests: &[String]) {
        self.dispatch(tests, LaunchMode::Run).await;
    }

    pub async fn debug(&self, tests: &[String]) {
        self.dispatch(tests, LaunchMode::Debug).await;
    }

    /// Cancellation of an in-flight run. Not implemented: the backend call is
    /// not tracked, so there is nothing to kill yet.
    pub fn cancel(&self) -> Result<()> {
        Err(AdapterError::CancellationUnsupported)
    }

    /// Resolves the selection, batches per compilation unit and issues the
    /// backend calls. Units are built at most once per batch; later calls for
    /// the same unit pass the skip-rebuild flag. `Finished` is emitted even
    /// when the batch aborts on a backend failure, keeping started/finished
    /// symmetric.
    async fn dispatch(&self, tests: &[String], mode: LaunchMode) {
        tracing::info!(?mode, ?tests, "dispatching tests");
        self.emit_state(TestRunEvent::Started {
            tests: tests.to_vec(),
        });

        let methods = self.index.resolve(tests);
        if self.config.group_runs_by_unit {
            self.dispatch_grouped(&methods, mode).await;
        } else {
            self.dispatch_singly(&methods, mode).await;
        }

        self.emit_state(TestRunEvent::Finished);
    }

    async fn dispatch_singly(&self, methods: &[&MethodNode], mode: LaunchMode) {
        let mut built: HashSet<&str> = HashSet::new();
        for method in methods.iter().copied() {
            let already_built = built.contains(method.assembly.as_str());
            let call = match mode {
                LaunchMode::Run => {
                    self.backend
                        .run_test(&method.full_name, &method.file, MSTEST_FRAMEWORK, already_built)
                        .await
                }
                LaunchMode::Debug => {
                    self.backend
                        .debug_test(&method.full_name, &method.file, MSTEST_FRAMEWORK, already_built)
                        .await
                }
            };
            if let Err(err) = call {
                tracing::error!(method = %method.full_name, error = %err, "backend call failed; aborting dispatch");
                return;
            }
            built.insert(method.assembly.as_str());
        }
    }

    async fn dispatch_grouped(&self, methods: &[&MethodNode], mode: LaunchMode) {
        let mut units: IndexMap<&str, Vec<&MethodNode>> = IndexMap::new();
        for method in methods.iter().copied() {
            units.entry(method.assembly.as_str()).or_default().push(method);
        }

        let mut built: HashSet<&str> = HashSet::new();
        for (unit, group) in &units {
            let unit = *unit;
            let already_built = built.contains(unit);
            let names: Vec<String> = group.iter().map(|m| m.full_name.clone()).collect();
            let source_file = &group[0].file;

            let call = match mode {
                LaunchMode::Run => {
                    self.backend
                        .run_tests_in_unit(unit, &names, source_file, MSTEST_FRAMEWORK, already_built)
                        .await
                }
                LaunchMode::Debug => {
                    self.backend
                        .debug_tests_in_unit(unit, &names, source_file, MSTEST_FRAMEWORK, already_built)
                        .await
                }
            };
            if let Err(err) = call {
                tracing::error!(unit = %unit, error = %err, "backend call failed; aborting dispatch");
                return;
            }
            built.insert(unit);
        }
    }

    /// Backend announced execution of one method; surface it as a running
    /// node. An unknown name is logged and dropped, never surfaced.
    fn handle_run_started(&self, method_name: &str) {
        match self.index.method_by_full_name(method_name) {
            Some(method) => {
                self.emit_state(TestRunEvent::Started {
                    tests: vec![method.id.clone()],
                });
            }
            None => {
                tracing::error!(method = %method_name, "run started for a method the index does not know");
            }
        }
    }

    /// Correlates a batch of backend outcomes to UI state events.
    fn handle_test_results(&self, results: &[TestResult]) {
        for result in results {
            let Some(method) = self.index.method_by_full_name(&result.method_name) else {
                tracing::error!(
                    method = %result.method_name,
                    outcome = ?result.outcome,
                    "result reported for a method the index does not know"
                );
                continue;
            };

            if result.outcome == TestOutcome::Failed {
                tracing::info!(method = %result.method_name, error = ?result.error_message, "test failed");
            } else {
                tracing::info!(method = %result.method_name, outcome = ?result.outcome, "test finished");
            }

            self.emit_state(TestRunEvent::TestStateChanged {
                test: method.id.clone(),
                state: TestState::from(result.outcome),
                message: Some(compose_message(result)),
            });
        }
    }

    fn emit_load(&self, event: TestLoadEvent) {
        if self.load_tx.send(event).is_err() {
            tracing::debug!("load event receiver dropped");
        }
    }

    fn emit_state(&self, event: TestRunEvent) {
        if self.state_tx.send(event).is_err() {
            tracing::debug!("state event receiver dropped");
        }
    }
}

/// Failure messages lead with the error and stack trace; captured output
/// follows in stdout-then-stderr order. Non-failures carry output only.
fn compose_message(result: &TestResult) -> String {
    let mut lines: Vec<&str> = Vec::new();
    if result.outcome == TestOutcome::Failed {
        lines.push(result.error_message.as_deref().unwrap_or_default());
        lines.push(result.error_stack_trace.as_deref().unwrap_or_default());
    }
    lines.extend(result.standard_output.iter().map(String::as_str));
    lines.extend(result.standard_error.iter().map(String::as_str));
    lines.join("\n")
}
