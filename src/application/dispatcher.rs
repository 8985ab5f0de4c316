//! Compilation dispatcher
//!
//! Runs one compiler job per definition on a bounded worker pool. Each job's
//! outcome travels back to the calling thread as a [`JobResult`], in
//! completion order; a failing job never affects its siblings.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;

use crate::domain::entities::{CompiledArtifact, Definition};
use crate::domain::ports::{CompileJobError, DefinitionCompiler};

/// Outcome of compiling one definition
#[derive(Debug)]
pub struct JobResult {
    pub definition: Definition,
    pub outcome: Result<CompiledArtifact, CompileJobError>,
}

/// Parallel compilation of definitions
pub struct CompilationDispatcher<C>
where
    C: DefinitionCompiler + 'static,
{
    compiler: Arc<C>,
    workers: usize,
}

impl<C> CompilationDispatcher<C>
where
    C: DefinitionCompiler + 'static,
{
    pub fn new(compiler: Arc<C>, workers: usize) -> Self {
        Self {
            compiler,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Compile every definition and hand each result to `on_result`
    ///
    /// `on_result` runs on the calling thread, one result at a time. If it
    /// returns an error, later results are no longer passed to it but every
    /// submitted job is still awaited; the first error is then returned.
    /// Returns the number of results handed to `on_result`.
    pub fn dispatch<F, E>(
        &self,
        definitions: Vec<Definition>,
        output_dir: &Path,
        on_result: F,
    ) -> Result<usize, E>
    where
        F: FnMut(JobResult) -> Result<(), E>,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("ksy-compile-{i}"))
            .build()
            .map_err(|err| {
                tracing::warn!("failed to create worker pool ({err}), compiling sequentially");
            })
            .ok();

        self.run_jobs(pool.as_ref(), definitions, output_dir, on_result)
    }

    /// Run the jobs on `pool`, or one after another on this thread without one
    fn run_jobs<F, E>(
        &self,
        pool: Option<&rayon::ThreadPool>,
        definitions: Vec<Definition>,
        output_dir: &Path,
        mut on_result: F,
    ) -> Result<usize, E>
    where
        F: FnMut(JobResult) -> Result<(), E>,
    {
        let (tx, rx) = mpsc::channel::<JobResult>();

        match pool {
            Some(pool) => {
                for definition in definitions {
                    let tx = tx.clone();
                    let compiler = Arc::clone(&self.compiler);
                    let output_dir = output_dir.to_path_buf();
                    pool.spawn(move || {
                        let result = run_job(compiler.as_ref(), definition, &output_dir);
                        // the receiver outlives every job
                        let _ = tx.send(result);
                    });
                }
            }
            None => {
                for definition in definitions {
                    let _ = tx.send(run_job(self.compiler.as_ref(), definition, output_dir));
                }
            }
        }
        drop(tx);

        let mut handled = 0;
        let mut first_error = None;
        // ends once every job has dropped its sender
        for result in rx {
            if first_error.is_some() {
                tracing::debug!("discarding result for {}", result.definition.key());
                continue;
            }
            handled += 1;
            if let Err(err) = on_result(result) {
                first_error = Some(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(handled),
        }
    }
}

fn run_job<C>(compiler: &C, definition: Definition, output_dir: &Path) -> JobResult
where
    C: DefinitionCompiler + ?Sized,
{
    tracing::debug!("compiling {}", definition.key());
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        compiler.compile(definition.path(), output_dir)
    }))
    .unwrap_or_else(|payload| Err(CompileJobError::Panicked(panic_message(payload.as_ref()))));

    JobResult {
        definition,
        outcome,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
