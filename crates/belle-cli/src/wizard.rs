//! # Wizard Subcommand
//!
//! Walks an onboarding wizard across invocations. The state lives in a JSON
//! session file, rewritten after every accepted operation and removed after
//! a successful submission.
//!
//! ## Subcommands
//!
//! - `start --flow <registration|verification> --session <file>`
//! - `set --session <file> [--step <name>] key=value...`
//! - `next --session <file> [--force]`
//! - `back --session <file>`
//! - `jump --session <file> --index <n>`
//! - `show --session <file>`
//! - `submit --session <file> [--out <file>]`
//!
//! A refused operation exits non-zero and leaves the session file as it was.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use belle_core::BelleError;
use belle_wizard::{
    is_current_step_complete, missing_fields, submit, Flow, FlowKind, IdentityVerification,
    ProviderRegistration, RegistrationStep, StepId, StepPayload, Submission, Submitter,
    VerificationStep, WizardState,
};

/// Arguments for the `belle wizard` subcommand.
#[derive(Args, Debug)]
pub struct WizardArgs {
    #[command(subcommand)]
    pub command: WizardCommand,
}

/// Wizard subcommands.
#[derive(Subcommand, Debug)]
pub enum WizardCommand {
    /// Start a new wizard session on its first step.
    Start {
        /// Which wizard to run.
        #[arg(long, value_enum)]
        flow: FlowArg,
        /// Session file to create.
        #[arg(long)]
        session: PathBuf,
        /// Overwrite an existing session file.
        #[arg(long)]
        force: bool,
    },

    /// Merge fields into a step's data (values are JSON, or plain strings).
    Set {
        /// Session file.
        #[arg(long)]
        session: PathBuf,
        /// Step to update; defaults to the current step.
        #[arg(long)]
        step: Option<String>,
        /// Fields as `key=value`.
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Move to the next step if the current one is complete.
    Next {
        /// Session file.
        #[arg(long)]
        session: PathBuf,
        /// Skip the required-field check.
        #[arg(long)]
        force: bool,
    },

    /// Move to the previous step.
    Back {
        /// Session file.
        #[arg(long)]
        session: PathBuf,
    },

    /// Go directly to a step by zero-based index.
    Jump {
        /// Session file.
        #[arg(long)]
        session: PathBuf,
        /// Target step index.
        #[arg(long)]
        index: usize,
    },

    /// Show the current step, progress and missing fields.
    Show {
        /// Session file.
        #[arg(long)]
        session: PathBuf,
    },

    /// Assemble the submission from the last step and write it out.
    Submit {
        /// Session file.
        #[arg(long)]
        session: PathBuf,
        /// Where to write the submission JSON; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Skip the required-field check on the last step.
        #[arg(long)]
        force: bool,
    },
}

/// Flow names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowArg {
    /// Provider registration.
    Registration,
    /// Identity verification.
    Verification,
}

/// Execute the wizard subcommand. Returns the process exit code.
pub fn run_wizard(args: &WizardArgs) -> Result<u8> {
    match &args.command {
        WizardCommand::Start {
            flow,
            session,
            force,
        } => {
            if session.exists() && !force {
                bail!(
                    "session {} already exists (use --force to overwrite)",
                    session.display()
                );
            }
            let s = Session::start(*flow)?;
            s.save(session)?;
            tracing::info!(flow = %s.kind(), path = %session.display(), "session started");
            println!("{}", s.summary());
        }
        WizardCommand::Set {
            session,
            step,
            fields,
        } => {
            let payload = parse_fields(fields)?;
            let s = Session::load(session)?.set_fields(step.as_deref(), payload)?;
            s.save(session)?;
            println!("{}", s.summary());
        }
        WizardCommand::Next { session, force } => {
            let s = Session::load(session)?.next(*force)?;
            s.save(session)?;
            println!("{}", s.summary());
        }
        WizardCommand::Back { session } => {
            let s = Session::load(session)?.back();
            s.save(session)?;
            println!("{}", s.summary());
        }
        WizardCommand::Jump { session, index } => {
            let s = Session::load(session)?.jump(*index)?;
            s.save(session)?;
            println!("{}", s.summary());
        }
        WizardCommand::Show { session } => {
            println!("{}", Session::load(session)?.summary());
        }
        WizardCommand::Submit {
            session,
            out,
            force,
        } => {
            let s = Session::load(session)?;
            let mut sink = JsonSubmitter::new(out.clone());
            s.submit(*force, &mut sink)?;
            std::fs::remove_file(session)
                .with_context(|| format!("failed to remove session {}", session.display()))?;
            tracing::info!(path = %session.display(), "session submitted and removed");
        }
    }
    Ok(0)
}

// ─── Session ─────────────────────────────────────────────────────────

/// A wizard in progress, tagged with its flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flow", content = "state", rename_all = "snake_case")]
pub enum Session {
    /// Provider registration in progress.
    ProviderRegistration(WizardState<RegistrationStep>),
    /// Identity verification in progress.
    IdentityVerification(WizardState<VerificationStep>),
}

impl Session {
    /// A fresh session for `flow`.
    pub fn start(flow: FlowArg) -> Result<Self> {
        Ok(match flow {
            FlowArg::Registration => Self::ProviderRegistration(ProviderRegistration::start()?),
            FlowArg::Verification => Self::IdentityVerification(IdentityVerification::start()?),
        })
    }

    /// Read a session file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse session {}", path.display()))
    }

    /// Write the session file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize session")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write session {}", path.display()))
    }

    /// Which flow this session runs.
    pub fn kind(&self) -> FlowKind {
        match self {
            Self::ProviderRegistration(_) => ProviderRegistration::KIND,
            Self::IdentityVerification(_) => IdentityVerification::KIND,
        }
    }

    /// Merge `payload` into `step` (by name) or the current step.
    pub fn set_fields(&self, step: Option<&str>, payload: StepPayload) -> Result<Self> {
        Ok(match self {
            Self::ProviderRegistration(w) => {
                Self::ProviderRegistration(set_fields(w, step, payload)?)
            }
            Self::IdentityVerification(w) => {
                Self::IdentityVerification(set_fields(w, step, payload)?)
            }
        })
    }

    /// Advance, gated on the current step's required fields unless `force`.
    pub fn next(&self, force: bool) -> Result<Self> {
        Ok(match self {
            Self::ProviderRegistration(w) => Self::ProviderRegistration(next(w, force)?),
            Self::IdentityVerification(w) => Self::IdentityVerification(next(w, force)?),
        })
    }

    /// Retreat one step.
    pub fn back(&self) -> Self {
        match self {
            Self::ProviderRegistration(w) => Self::ProviderRegistration(w.retreat()),
            Self::IdentityVerification(w) => Self::IdentityVerification(w.retreat()),
        }
    }

    /// Jump to a step index.
    pub fn jump(&self, index: usize) -> Result<Self> {
        Ok(match self {
            Self::ProviderRegistration(w) => Self::ProviderRegistration(w.jump_to(index)?),
            Self::IdentityVerification(w) => Self::IdentityVerification(w.jump_to(index)?),
        })
    }

    /// Human-readable progress listing.
    pub fn summary(&self) -> String {
        match self {
            Self::ProviderRegistration(w) => summary(self.kind(), w),
            Self::IdentityVerification(w) => summary(self.kind(), w),
        }
    }

    /// Assemble and hand the submission to `sink`.
    pub fn submit(&self, force: bool, sink: &mut JsonSubmitter) -> Result<()> {
        let kind = self.kind();
        let id = match self {
            Self::ProviderRegistration(w) => {
                submit::<ProviderRegistration, _>(w, force || is_current_step_complete(w), sink)?
            }
            Self::IdentityVerification(w) => {
                submit::<IdentityVerification, _>(w, force || is_current_step_complete(w), sink)?
            }
        };
        tracing::info!(%id, flow = %kind, "submission delivered");
        Ok(())
    }
}

fn set_fields<S: StepId>(
    state: &WizardState<S>,
    step: Option<&str>,
    payload: StepPayload,
) -> Result<WizardState<S>> {
    let step = match step {
        Some(name) => state.step_named(name).ok_or_else(|| {
            let known: Vec<&str> = state.steps().iter().map(|s| s.as_str()).collect();
            anyhow!("unknown step {name:?}; expected one of: {}", known.join(", "))
        })?,
        None => state.current_step(),
    };
    Ok(state.update_step_data(step, payload)?)
}

fn next<S: StepId>(state: &WizardState<S>, force: bool) -> Result<WizardState<S>> {
    let step = state.current_step();
    let missing = missing_fields(step, state.step_data(step));
    let valid = force || missing.is_empty();
    if force && !missing.is_empty() {
        tracing::warn!(%step, ?missing, "advancing past incomplete step (--force)");
    }
    state
        .advance(valid)
        .with_context(|| format!("missing required fields: {}", missing.join(", ")))
}

fn summary<S: StepId>(kind: FlowKind, state: &WizardState<S>) -> String {
    let (position, total) = state.progress();
    let mut out = format!(
        "flow: {kind}\nstep {position} of {total}: {}\n",
        state.current_step()
    );
    for (index, step) in state.steps().iter().enumerate() {
        let missing = missing_fields(*step, state.step_data(*step));
        let marker = if index == state.current_index() {
            ">"
        } else if missing.is_empty() {
            "x"
        } else {
            " "
        };
        out.push_str(&format!("  [{marker}] {index} {step}"));
        // Steps after the cursor have not been reached yet.
        if index <= state.current_index() && !missing.is_empty() {
            out.push_str(&format!("  (missing: {})", missing.join(", ")));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Parse `key=value` pairs. Values are read as JSON when they parse
/// (`true`, `42`, `["a"]`), otherwise kept as strings.
pub fn parse_fields(fields: &[String]) -> Result<StepPayload> {
    let mut payload = StepPayload::new();
    for field in fields {
        let (key, raw) = field
            .split_once('=')
            .ok_or_else(|| anyhow!("field {field:?} must be key=value"))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("field {field:?} has an empty key");
        }
        let value =
            serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        payload.insert(key.to_string(), value);
    }
    Ok(payload)
}

// ─── Submitter ───────────────────────────────────────────────────────

/// Writes submissions as pretty JSON to a file, or to stdout.
///
/// Stands in for the API client when driving the wizard from a terminal.
#[derive(Debug)]
pub struct JsonSubmitter {
    out: Option<PathBuf>,
}

impl JsonSubmitter {
    /// Write to `out`, or to stdout when `None`.
    pub fn new(out: Option<PathBuf>) -> Self {
        Self { out }
    }
}

impl<S: StepId + Serialize> Submitter<S> for JsonSubmitter {
    type Error = BelleError;

    fn submit(&mut self, submission: &Submission<S>) -> Result<(), BelleError> {
        let json = serde_json::to_string_pretty(submission)?;
        match &self.out {
            Some(path) => std::fs::write(path, json)?,
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}")?;
            }
        }
        Ok(())
    }
}
