//! The build pipeline: parse, resolve, generate, reduce, deliver.
//!
//! [`Builder`] owns the collaborators for each step. The reducer and the
//! writer sit behind traits so tests and embedders can swap them:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use carve_bundler::{Builder, MemoryWriter};
//! use carve_config::Settings;
//! use carve_registry::Registry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let writer = MemoryWriter::new();
//! let builder = Builder::new(Registry::builtin()?, Settings::default(), "/work")
//!     .with_writer(Arc::new(writer.clone()));
//!
//! let outcome = builder.run(&["include=map", "-o", "map.js"]).await;
//! assert!(outcome.is_success());
//! assert!(writer.file("/work/map.js".as_ref()).is_some());
//! # Ok(())
//! # }
//! ```
//!
//! Only delivery touches the outside world. A build that fails earlier
//! leaves no file behind.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use carve_config::{BuildConfig, Delivery, OutputMode, Settings, parse_tokens};
use carve_registry::Registry;
use path_clean::PathClean;

use crate::diagnostics::BuildDiagnostic;
use crate::output::{BuildOutcome, Destination, default_file_name};
use crate::reducer::{OxcReducer, ReduceOptions, Reducer, reduce_checked};
use crate::resolver::resolve;
use crate::writer::{FsWriter, OutputWriter};

/// Runs build commands against a shared registry.
///
/// Cheap to clone; clones share the registry and collaborators, so one
/// builder can serve many concurrent builds.
#[derive(Clone)]
pub struct Builder {
    registry: Arc<Registry>,
    settings: Arc<Settings>,
    root: PathBuf,
    reducer: Arc<dyn Reducer>,
    writer: Arc<dyn OutputWriter>,
    reduce_options: ReduceOptions,
}

impl Builder {
    /// A builder writing to the filesystem under `root`.
    pub fn new(registry: Arc<Registry>, settings: Settings, root: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            settings: Arc::new(settings),
            root: root.into(),
            reducer: Arc::new(OxcReducer),
            writer: Arc::new(FsWriter),
            reduce_options: ReduceOptions::default(),
        }
    }

    /// Replaces the size-reducing pass. Its output is still checked.
    pub fn with_reducer(mut self, reducer: Arc<dyn Reducer>) -> Self {
        self.reducer = reducer;
        self
    }

    /// Replaces where finished modules go.
    pub fn with_writer(mut self, writer: Arc<dyn OutputWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_reduce_options(mut self, options: ReduceOptions) -> Self {
        self.reduce_options = options;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Runs one build and hands the outcome to `on_complete`.
    ///
    /// `on_complete` is called exactly once, also when the build fails.
    pub async fn build<S, F>(&self, tokens: &[S], on_complete: F)
    where
        S: AsRef<str>,
        F: FnOnce(BuildOutcome),
    {
        on_complete(self.run(tokens).await);
    }

    /// Runs independent builds concurrently, one task each.
    ///
    /// Outcomes come back in batch order.
    pub async fn build_many(&self, batch: Vec<Vec<String>>) -> Vec<BuildOutcome> {
        let handles: Vec<_> = batch
            .into_iter()
            .map(|tokens| {
                let builder = self.clone();
                tokio::spawn(async move { builder.run(&tokens).await })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            outcomes.push(handle.await.unwrap_or_else(|e| {
                BuildOutcome::failed(BuildDiagnostic::error(
                    "carve::build::task",
                    format!("build task failed: {e}"),
                ))
            }));
        }
        outcomes
    }

    /// Runs one build. Never fails: problems become diagnostics.
    pub async fn run<S: AsRef<str>>(&self, tokens: &[S]) -> BuildOutcome {
        let started = Instant::now();

        let config = match parse_tokens(tokens, &self.registry, &self.settings.parse_options()) {
            Ok(config) => config,
            Err(err) => {
                let outcome = BuildOutcome::failed(BuildDiagnostic::from_error(&err));
                if !silent_requested(tokens) {
                    report(&outcome);
                }
                return outcome;
            }
        };

        let set = resolve(&self.registry, &config);
        let module = match carve_gen::generate(&self.registry, &set, &config) {
            Ok(module) => module,
            Err(err) => {
                let outcome = BuildOutcome::failed(BuildDiagnostic::from_error(&err));
                if !config.silent {
                    report(&outcome);
                }
                return outcome;
            }
        };

        let mut diagnostics: Vec<BuildDiagnostic> =
            module.warnings.iter().map(BuildDiagnostic::from).collect();
        let mut source = module.source;

        let minified = self.should_reduce(&config) && !source.is_empty();
        if minified {
            match reduce_checked(self.reducer.as_ref(), source.clone(), &self.reduce_options).await {
                Ok(reduced) => source = reduced,
                Err(err) => diagnostics.push(BuildDiagnostic::warning_from(&err)),
            }
        }

        let destination = self.destination(&config, minified);
        let delivered = match &destination {
            Destination::File(path) => self.writer.write_file(path, &source).await,
            Destination::Stdout => self.writer.write_stdout(&source).await,
            Destination::Unresolved => Ok(()),
        };
        if let Err(err) = delivered {
            diagnostics.push(BuildDiagnostic::from_error(&err));
        }

        tracing::debug!(
            functions = set.len(),
            bytes = source.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "build finished"
        );

        let outcome = BuildOutcome {
            source,
            destination,
            diagnostics,
        };
        if !config.silent {
            report(&outcome);
        }
        outcome
    }

    fn should_reduce(&self, config: &BuildConfig) -> bool {
        match config.output_mode {
            OutputMode::Debug => false,
            OutputMode::Minify => true,
            OutputMode::Default => self.settings.minify,
        }
    }

    fn destination(&self, config: &BuildConfig, minified: bool) -> Destination {
        match &config.delivery {
            Delivery::Stdout => Destination::Stdout,
            Delivery::File(path) => Destination::File(self.root.join(path).clean()),
            Delivery::DefaultFile => Destination::File(
                self.root
                    .join(&self.settings.out_dir)
                    .join(default_file_name(config, minified))
                    .clean(),
            ),
        }
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("root", &self.root)
            .field("settings", &self.settings)
            .field("reduce_options", &self.reduce_options)
            .finish_non_exhaustive()
    }
}

/// `-s` still applies when the rest of the command does not parse.
fn silent_requested<S: AsRef<str>>(tokens: &[S]) -> bool {
    tokens
        .iter()
        .any(|token| matches!(token.as_ref(), "-s" | "--silent"))
}

fn report(outcome: &BuildOutcome) {
    for diagnostic in &outcome.diagnostics {
        diagnostic.log();
    }
}
