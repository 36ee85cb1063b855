//! Scripted input collaborator.
//!
//! Plays the role a UI input layer would: feeds placement and drag events
//! into the core and reports what happened. Placement rejections are normal
//! outcomes; rejected session transitions go through the configured
//! [`InvalidStatePolicy`].

use effigy_catalog::ShapeCatalog;
use effigy_core::{DragSession, Grid, GridError, Release};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::InvalidStatePolicy;
use crate::script::{Command, ScriptLine};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("line {line}: unknown shape '{name}'")]
    UnknownShape { line: usize, name: String },

    #[error("line {line}: {source}")]
    Aborted { line: usize, source: GridError },
}

/// Counters reported at the end of a replay.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayStats {
    pub commands: usize,
    pub placed: usize,
    pub committed: usize,
    pub cancelled: usize,
    pub rejected: usize,
    pub ignored: usize,
}

pub struct Replayer {
    grid: Grid,
    session: DragSession,
    catalog: ShapeCatalog,
    policy: InvalidStatePolicy,
    stats: ReplayStats,
}

impl Replayer {
    pub fn new(grid: Grid, catalog: ShapeCatalog, policy: InvalidStatePolicy) -> Self {
        Self {
            grid,
            session: DragSession::new(),
            catalog,
            policy,
            stats: ReplayStats::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Apply every line in order. Stops at the first fatal error.
    pub fn run(&mut self, script: &[ScriptLine]) -> Result<ReplayStats, ReplayError> {
        for line in script {
            self.apply(line)?;
        }
        Ok(self.stats.clone())
    }

    pub fn apply(&mut self, script_line: &ScriptLine) -> Result<(), ReplayError> {
        let line = script_line.line;
        self.stats.commands += 1;

        match &script_line.command {
            Command::Place {
                item,
                shape,
                anchor,
            } => {
                let footprint =
                    self.catalog
                        .get(shape)
                        .ok_or_else(|| ReplayError::UnknownShape {
                            line,
                            name: shape.clone(),
                        })?;
                match self.grid.try_occupy(*anchor, footprint, *item) {
                    Ok(()) => {
                        self.stats.placed += 1;
                        info!("line {line}: placed {shape} {item} at {anchor}");
                    }
                    Err(e) => self.on_error(line, e)?,
                }
            }
            Command::Release(item) => match self.grid.release(*item) {
                Release::Released { cells } => {
                    info!("line {line}: released {item} ({cells} cells)");
                }
                Release::NoOpIgnored => {
                    debug!("line {line}: {item} not on grid, nothing to release");
                }
            },
            Command::Begin(item) => match self.session.begin(&self.grid, *item) {
                Ok(()) => debug!("line {line}: picked up {item}"),
                Err(e) => self.on_error(line, e)?,
            },
            Command::Hover(anchor) => match self.session.update_hover(&self.grid, *anchor) {
                Ok(validity) => debug!("line {line}: hover {anchor} -> {validity:?}"),
                Err(e) => self.on_error(line, e)?,
            },
            Command::Drop(anchor) => match self.session.drop(&mut self.grid, *anchor) {
                Ok(placed) => {
                    self.stats.committed += 1;
                    info!("line {line}: dropped {} at {}", placed.item, placed.anchor);
                }
                Err(e @ GridError::InvalidState { .. }) => self.on_error(line, e)?,
                Err(e) => {
                    self.stats.cancelled += 1;
                    info!("line {line}: drop cancelled: {e}");
                }
            },
            Command::Cancel => match self.session.cancel() {
                Ok(()) => {
                    self.stats.cancelled += 1;
                    info!("line {line}: drag cancelled");
                }
                Err(e) => self.on_error(line, e)?,
            },
            Command::Reset => {
                if let Err(e) = self.session.reset() {
                    self.on_error(line, e)?;
                }
            }
        }
        Ok(())
    }

    /// Log the final layout, one line per item in id order.
    pub fn log_layout(&self) {
        let mut placed: Vec<_> = self.grid.placements().collect();
        placed.sort_by_key(|p| p.item);
        for p in placed {
            info!("{} at {} ({} cells)", p.item, p.anchor, p.shape.len());
        }
    }

    fn on_error(&mut self, line: usize, e: GridError) -> Result<(), ReplayError> {
        match e {
            GridError::InvalidState { .. } => match self.policy {
                InvalidStatePolicy::Abort => Err(ReplayError::Aborted { line, source: e }),
                InvalidStatePolicy::Log => {
                    self.stats.ignored += 1;
                    error!("line {line}: {e} (ignored)");
                    Ok(())
                }
            },
            _ => {
                self.stats.rejected += 1;
                info!("line {line}: rejected: {e}");
                Ok(())
            }
        }
    }
}
