//! Run Trial use case
//!
//! [`TrialOrchestrator`] owns the state of one courtroom session and
//! sequences every turn: it routes each operation to the right role agent,
//! records every exchange in the transcript, scores the user's submissions,
//! and persists the record when the trial ends.
//!
//! # Lifecycle
//!
//! `Inactive -> Active -> Inactive`. Only [`start_trial`](TrialOrchestrator::start_trial)
//! enters `Active` (discarding any trial in progress) and only
//! [`end_trial`](TrialOrchestrator::end_trial) leaves it. Every other
//! mutating operation fails with [`TrialError::Inactive`] and leaves the
//! state untouched while no trial is active.

use crate::agents::{
    AgentCore, DeliberationPolicy, Judge, Jury, Prosecutor, RandomDeliberation, Witness,
};
use crate::config::TrialSettings;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::retrieval::{RetrievalInitializer, RetrievalPort};
use crate::ports::text_generation::TextGenerator;
use crate::ports::transcript_store::{PersistenceError, TranscriptStore};
use crate::use_cases::evaluate_input::EvaluationScorer;
use chrono::Local;
use courtroom_domain::{
    ExaminationMode, InputKind, InstructionPhase, PerformanceReport, PromptTemplates, RoleProfile,
    ScoreEntry, Transcript, TrialError, TrialRecord, TrialState, TrialStatus, WitnessRecord,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Verdict text of the outcome returned when no trial is active.
pub const NO_ACTIVE_TRIAL_VERDICT: &str = "No active trial to end.";

/// Everything needed to open a trial.
#[derive(Debug, Clone, Default)]
pub struct StartTrialInput {
    pub case_context: String,
    /// Witness name -> testimony
    pub witnesses: BTreeMap<String, String>,
    /// Evidence id -> description
    pub evidence: BTreeMap<String, String>,
}

impl StartTrialInput {
    pub fn new(case_context: impl Into<String>) -> Self {
        Self {
            case_context: case_context.into(),
            ..Default::default()
        }
    }

    pub fn with_witness(mut self, name: impl Into<String>, testimony: impl Into<String>) -> Self {
        self.witnesses.insert(name.into(), testimony.into());
        self
    }

    pub fn with_evidence(mut self, id: impl Into<String>, description: impl Into<String>) -> Self {
        self.evidence.insert(id.into(), description.into());
        self
    }
}

/// Result of one prosecution round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProsecutionTurn {
    pub prosecution: String,
    /// `None` when the judge had nothing to add
    pub judge: Option<String>,
}

/// An objection raised against a defense statement and the ruling on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectionExchange {
    pub objection: String,
    pub ruling: String,
}

/// Result of ending a trial.
///
/// When no trial was active the outcome is a sentinel: the verdict is
/// [`NO_ACTIVE_TRIAL_VERDICT`] and every other field is `None`.
#[derive(Debug)]
pub struct TrialOutcome {
    pub final_instructions: Option<String>,
    pub verdict: String,
    pub performance: Option<PerformanceReport>,
    /// Where the record was saved; a failed save does not void the verdict
    pub persistence: Option<Result<PathBuf, PersistenceError>>,
}

impl TrialOutcome {
    fn no_active_trial() -> Self {
        Self {
            final_instructions: None,
            verdict: NO_ACTIVE_TRIAL_VERDICT.to_string(),
            performance: None,
            persistence: None,
        }
    }

    /// True when a trial was actually concluded.
    pub fn is_concluded(&self) -> bool {
        self.performance.is_some()
    }
}

/// Drives one courtroom session at a time.
pub struct TrialOrchestrator {
    settings: TrialSettings,
    generator: Arc<dyn TextGenerator>,
    templates: Arc<PromptTemplates>,
    scorer: EvaluationScorer,
    store: Arc<dyn TranscriptStore>,
    retrieval_source: Option<Arc<dyn RetrievalInitializer>>,
    logger: Arc<dyn ConversationLogger>,
    progress: Arc<dyn ProgressNotifier>,
    jury: Jury,
    retrieval: Option<Arc<dyn RetrievalPort>>,
    state: TrialState,
}

impl TrialOrchestrator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn TranscriptStore>,
        settings: TrialSettings,
    ) -> Self {
        Self {
            settings,
            generator,
            templates: Arc::new(PromptTemplates::default()),
            scorer: EvaluationScorer::unconfigured(),
            store,
            retrieval_source: None,
            logger: Arc::new(NoConversationLogger),
            progress: Arc::new(NoProgress),
            jury: Jury::new(Arc::new(RandomDeliberation)),
            retrieval: None,
            state: TrialState::default(),
        }
    }

    /// Build the document index from this source at every trial start.
    pub fn with_retrieval(mut self, source: Arc<dyn RetrievalInitializer>) -> Self {
        self.retrieval_source = Some(source);
        self
    }

    pub fn with_scorer(mut self, scorer: EvaluationScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_templates(mut self, templates: Arc<PromptTemplates>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_deliberation(mut self, policy: Arc<dyn DeliberationPolicy>) -> Self {
        self.jury = Jury::new(policy);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    // ==================== Operations ====================

    /// Open a new trial and return the judge's opening instructions.
    ///
    /// Any trial in progress is discarded without being saved.
    pub async fn start_trial(&mut self, input: StartTrialInput) -> String {
        if self.state.active {
            warn!("Starting a new trial discards the one in progress");
        }
        info!(
            witnesses = input.witnesses.len(),
            evidence = input.evidence.len(),
            "Starting trial"
        );

        self.state = TrialState::begin(input.case_context.as_str());
        self.retrieval = None;
        self.jury.reset();

        self.progress.on_role_start("Evaluator", "scoring case description");
        let evaluation = self
            .scorer
            .evaluate(InputKind::CaseDescription, &input.case_context, "")
            .await;
        self.progress.on_role_complete("Evaluator", true);
        self.log_evaluation(InputKind::CaseDescription, &evaluation);
        self.state.performance.case_description_eval = evaluation;

        self.retrieval = self.initialize_retrieval().await;

        for (name, testimony) in input.witnesses {
            self.state.add_witness(WitnessRecord::new(name, testimony));
        }
        for (id, description) in input.evidence {
            self.state.add_evidence(id, description);
        }

        self.jury.receive_case_info(&input.case_context);
        self.logger.log(ConversationEvent::trial_started(
            &input.case_context,
            &self.witness_names(),
            &self.state.evidence.keys().collect::<Vec<_>>(),
            self.retrieval.is_some(),
        ));

        self.record("System", format!("Trial started for case: {}", input.case_context));

        self.progress.on_role_start("Judge", "opening instructions");
        let instructions = self.judge().provide_instructions(InstructionPhase::Opening).await;
        self.progress.on_role_complete("Judge", true);
        self.record("Judge", instructions.as_str());

        instructions
    }

    /// Run one prosecution round: the prosecutor argues, then the judge may comment.
    pub async fn process_prosecution(&mut self) -> Result<ProsecutionTurn, TrialError> {
        self.ensure_active()?;
        self.state.current_round += 1;
        debug!(round = self.state.current_round, "Prosecution round");

        let case_context = self.state.case_context().to_string();

        self.progress.on_role_start("Prosecutor", "preparing argument");
        let prosecution = self
            .prosecutor()
            .process_context(
                &case_context,
                &self.state.transcript.interaction_history(),
                self.retrieval.as_deref(),
            )
            .await;
        self.progress.on_role_complete("Prosecutor", true);
        self.record("Prosecutor", prosecution.as_str());

        self.progress.on_role_start("Judge", "reviewing proceedings");
        let judge = self
            .judge()
            .process_context(
                &case_context,
                &self.state.transcript.interaction_history(),
                self.retrieval.as_deref(),
            )
            .await;
        self.progress.on_role_complete("Judge", true);
        if let Some(comment) = &judge {
            self.record("Judge", comment.as_str());
        }

        Ok(ProsecutionTurn { prosecution, judge })
    }

    /// Submit a defense statement.
    ///
    /// The statement is recorded and scored, then the prosecutor may object.
    /// `Ok(None)` means no objection was raised.
    pub async fn process_defense(
        &mut self,
        statement: &str,
    ) -> Result<Option<ObjectionExchange>, TrialError> {
        self.ensure_active()?;

        self.record("Defense", statement);

        self.progress.on_role_start("Evaluator", "scoring defense statement");
        let evaluation = self
            .scorer
            .evaluate(
                InputKind::DefenseStatement,
                statement,
                &self.state.transcript.interaction_history(),
            )
            .await;
        self.progress.on_role_complete("Evaluator", true);
        self.log_evaluation(InputKind::DefenseStatement, &evaluation);
        self.state.performance.defense_statement_evals.push(evaluation);

        self.progress.on_role_start("Prosecutor", "considering objection");
        let objection = self
            .prosecutor()
            .object_to_defense(
                statement,
                &self.state.transcript.interaction_history(),
                self.retrieval.as_deref(),
            )
            .await;
        self.progress.on_role_complete("Prosecutor", true);

        let Some(objection) = objection else {
            return Ok(None);
        };
        self.record("Prosecutor", format!("Objection: {}", objection));

        self.progress.on_role_start("Judge", "ruling on objection");
        let ruling = self
            .judge()
            .rule_on_objection(
                &objection,
                &self.state.transcript.interaction_history(),
                self.retrieval.as_deref(),
            )
            .await;
        self.progress.on_role_complete("Judge", true);
        self.record("Judge", ruling.as_str());

        Ok(Some(ObjectionExchange { objection, ruling }))
    }

    /// Put a witness on the stand and return the announcement with their testimony.
    pub fn call_witness(&mut self, name: &str) -> Result<String, TrialError> {
        self.ensure_active()?;

        let record = self
            .state
            .seat_witness(name)
            .cloned()
            .ok_or_else(|| TrialError::WitnessNotFound(name.to_string()))?;
        info!(witness = name, "Witness called");

        let testimony = self.witness(&record).provide_testimony();
        self.record(record.speaker_label(), testimony.as_str());

        let remark = format!("The witness, {}, will now testify.", name);
        self.record("Judge", remark.as_str());

        self.jury.receive_testimony_summary(name, &testimony);

        Ok(format!("{}\n{}", remark, testimony))
    }

    /// Question the witness on the stand (direct examination).
    pub async fn examine_witness(
        &mut self,
        questioner: &str,
        question: &str,
    ) -> Result<String, TrialError> {
        self.question_witness(questioner, question, ExaminationMode::Direct)
            .await
    }

    /// Question the witness on the stand (cross-examination).
    pub async fn cross_examine_witness(
        &mut self,
        questioner: &str,
        question: &str,
    ) -> Result<String, TrialError> {
        self.question_witness(questioner, question, ExaminationMode::Cross)
            .await
    }

    async fn question_witness(
        &mut self,
        questioner: &str,
        question: &str,
        mode: ExaminationMode,
    ) -> Result<String, TrialError> {
        self.ensure_active()?;
        let record = self
            .state
            .current_witness()
            .cloned()
            .ok_or(TrialError::NoWitnessOnStand)?;

        self.record(questioner, format!("Question: {}", question));

        self.progress.on_role_start(&record.name, mode.participle());
        let answer = self.witness(&record).answer_question(question, mode).await;
        self.progress.on_role_complete(&record.name, true);

        self.record(record.speaker_label(), answer.as_str());
        self.jury.receive_testimony_summary(&record.name, &answer);

        Ok(answer)
    }

    /// Present a piece of evidence to the court.
    pub fn present_evidence(
        &mut self,
        presenter: &str,
        evidence_id: &str,
    ) -> Result<String, TrialError> {
        self.ensure_active()?;

        let description = self
            .state
            .evidence
            .get(evidence_id)
            .cloned()
            .ok_or_else(|| TrialError::EvidenceNotFound(evidence_id.to_string()))?;

        let presentation = format!("presents {}: {}", evidence_id, description);
        self.record(presenter, presentation.as_str());

        self.jury.receive_evidence(evidence_id, &description);

        let remark = format!("The court acknowledges the presentation of {}.", evidence_id);
        self.record("Judge", remark.as_str());

        Ok(format!("{} {}\nJudge: {}", presenter, presentation, remark))
    }

    /// Close the trial: closing instructions, jury verdict, persistence.
    pub async fn end_trial(&mut self) -> TrialOutcome {
        if !self.state.active {
            return TrialOutcome::no_active_trial();
        }
        self.state.active = false;
        info!(rounds = self.state.current_round, "Ending trial");

        self.progress.on_role_start("Judge", "closing instructions");
        let instructions = self.judge().provide_instructions(InstructionPhase::Closing).await;
        self.progress.on_role_complete("Judge", true);
        self.record("Judge", instructions.as_str());
        self.jury.receive_instructions(&instructions);

        self.progress.on_role_start(self.jury.name(), "deliberating");
        let verdict = self
            .jury
            .deliberate_and_decide(&self.state.transcript.formatted());
        self.progress.on_role_complete(self.jury.name(), true);
        self.record("Jury", verdict.as_str());

        let record = TrialRecord::capture(&self.state, Local::now());
        let persistence = self.store.save(&record);
        match &persistence {
            Ok(path) => info!("Transcript saved to {}", path.display()),
            Err(e) => warn!("Transcript could not be saved: {}", e),
        }

        self.logger.log(ConversationEvent::trial_ended(
            &verdict,
            self.state.current_round,
            persistence.as_ref().ok().map(|p| p.as_path()),
        ));

        TrialOutcome {
            final_instructions: Some(instructions),
            verdict,
            performance: Some(self.state.performance.clone()),
            persistence: Some(persistence),
        }
    }

    // ==================== Queries ====================

    pub fn status(&self) -> TrialStatus {
        self.state.status(self.settings.max_rounds)
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn settings(&self) -> &TrialSettings {
        &self.settings
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    pub fn retrieval_enabled(&self) -> bool {
        self.retrieval.is_some()
    }

    pub fn witness_names(&self) -> Vec<String> {
        self.state.witnesses.keys().cloned().collect()
    }

    pub fn evidence(&self) -> &BTreeMap<String, String> {
        &self.state.evidence
    }

    pub fn current_witness(&self) -> Option<&WitnessRecord> {
        self.state.current_witness()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.state.transcript
    }

    pub fn performance(&self) -> &PerformanceReport {
        &self.state.performance
    }

    pub fn jury(&self) -> &Jury {
        &self.jury
    }

    // ==================== Internals ====================

    fn ensure_active(&self) -> Result<(), TrialError> {
        if self.state.active {
            Ok(())
        } else {
            Err(TrialError::Inactive)
        }
    }

    /// Append to the transcript (and its history) and log the entry.
    fn record(&mut self, speaker: impl Into<String>, content: impl Into<String>) {
        let entry = self.state.transcript.record(speaker, content);
        self.logger.log(ConversationEvent::transcript_entry(entry));
    }

    fn log_evaluation(&self, kind: InputKind, entry: &ScoreEntry) {
        self.logger.log(ConversationEvent::evaluation(kind, entry));
    }

    async fn initialize_retrieval(&self) -> Option<Arc<dyn RetrievalPort>> {
        let source = self.retrieval_source.as_ref()?;
        match source.initialize().await {
            Ok(Some(index)) => {
                info!("Document retrieval ready");
                Some(index)
            }
            Ok(None) => {
                info!("No documents to index; retrieval disabled for this trial");
                None
            }
            Err(e) => {
                warn!("Document retrieval disabled for this trial: {}", e);
                None
            }
        }
    }

    fn core(&self, profile: RoleProfile) -> AgentCore {
        AgentCore::new(
            profile,
            Arc::clone(&self.generator),
            Arc::clone(&self.templates),
            self.settings.generation,
            self.settings.max_response_length,
        )
    }

    fn prosecutor(&self) -> Prosecutor {
        Prosecutor::new(self.core(RoleProfile::prosecutor()))
    }

    fn judge(&self) -> Judge {
        Judge::new(self.core(RoleProfile::judge()))
    }

    fn witness(&self, record: &WitnessRecord) -> Witness {
        Witness::new(self.core(RoleProfile::witness(&record.name)), record.clone())
    }
}
