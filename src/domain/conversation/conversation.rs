//! Conversation entity - questionnaire progress for one user session.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ConversationStatus, LogEntry};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, Timestamp};
use crate::domain::questionnaire::QuestionCatalog;

/// Notice appended to the log when the last question is answered.
pub const COMPLETION_NOTICE: &str = "All questions answered! Ready to generate code.";

/// What happened after an answer was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The conversation moved to this 1-based step.
    Next(usize),
    /// The last question was answered.
    Completed,
}

/// Conversation entity - tracks questionnaire progress.
///
/// # Invariants
///
/// - `current_step` starts at 1 and only ever increases by one per answer
/// - `answers` holds keys only for steps already answered, in step order
/// - once `status` is `Completed`, the entity never changes again
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    status: ConversationStatus,
    current_step: usize,
    answers: IndexMap<String, String>,
    message_log: Vec<LogEntry>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Conversation {
    /// Starts a fresh conversation at step 1.
    pub fn start() -> Self {
        let now = Timestamp::now();
        Self {
            id: ConversationId::new(),
            status: ConversationStatus::Active,
            current_step: 1,
            answers: IndexMap::new(),
            message_log: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn answers(&self) -> &IndexMap<String, String> {
        &self.answers
    }

    pub fn answer(&self, field: &str) -> Option<&str> {
        self.answers.get(field).map(String::as_str)
    }

    pub fn message_log(&self) -> &[LogEntry] {
        &self.message_log
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    // === State Transitions ===

    /// Records `answer` for the current question and moves one step forward.
    ///
    /// The answer is stored verbatim, multi-select answers included.
    /// Fails with `InvalidState` once the conversation is completed.
    pub fn advance(
        &mut self,
        catalog: &QuestionCatalog,
        answer: impl Into<String>,
    ) -> Result<StepOutcome, DomainError> {
        if self.is_completed() {
            return Err(DomainError::invalid_state("Conversation is already completed")
                .with_detail("conversation_id", self.id.to_string()));
        }

        let question = catalog.question(self.current_step).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidState,
                format!("No question at step {}", self.current_step),
            )
        })?;

        let answer = answer.into();
        self.message_log
            .push(LogEntry::user(answer.clone(), self.current_step));
        self.answers.insert(question.field.clone(), answer);

        let next_step = self.current_step + 1;
        self.current_step = next_step;
        self.updated_at = Timestamp::now();

        match catalog.question(next_step) {
            Some(next) => {
                self.message_log
                    .push(LogEntry::system(next.prompt.clone(), next_step));
                Ok(StepOutcome::Next(next_step))
            }
            None => {
                self.status = ConversationStatus::Completed;
                self.message_log
                    .push(LogEntry::system(COMPLETION_NOTICE, next_step));
                Ok(StepOutcome::Completed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::LogRole;
    use proptest::prelude::*;

    fn answer_all(conv: &mut Conversation, catalog: &QuestionCatalog) {
        for i in 0..catalog.len() {
            conv.advance(catalog, format!("answer {}", i + 1)).unwrap();
        }
    }

    #[test]
    fn start_is_active_at_step_one() {
        let conv = Conversation::start();
        assert_eq!(conv.status(), ConversationStatus::Active);
        assert_eq!(conv.current_step(), 1);
        assert!(conv.answers().is_empty());
        assert!(conv.message_log().is_empty());
    }

    #[test]
    fn six_answers_leave_conversation_active() {
        let catalog = QuestionCatalog::standard();
        let mut conv = Conversation::start();
        for i in 1..=6 {
            let outcome = conv.advance(&catalog, format!("a{}", i)).unwrap();
            assert_eq!(outcome, StepOutcome::Next(i + 1));
        }
        assert_eq!(conv.status(), ConversationStatus::Active);
        assert_eq!(conv.current_step(), 7);
    }

    #[test]
    fn seventh_answer_completes_with_all_answers_in_order() {
        let catalog = QuestionCatalog::standard();
        let mut conv = Conversation::start();
        for i in 1..=6 {
            conv.advance(&catalog, format!("a{}", i)).unwrap();
        }
        let outcome = conv.advance(&catalog, "a7").unwrap();

        assert_eq!(outcome, StepOutcome::Completed);
        assert!(conv.is_completed());
        assert_eq!(conv.current_step(), 8);
        let keys: Vec<&String> = conv.answers().keys().collect();
        let expected: Vec<&str> = catalog.fields().collect();
        assert_eq!(keys, expected);
        assert_eq!(conv.answer("integration"), Some("a7"));
    }

    #[test]
    fn advance_after_completion_is_invalid_state() {
        let catalog = QuestionCatalog::standard();
        let mut conv = Conversation::start();
        answer_all(&mut conv, &catalog);
        let snapshot = conv.clone();

        let err = conv.advance(&catalog, "late").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(conv, snapshot);
    }

    #[test]
    fn multi_select_answer_is_stored_verbatim() {
        let catalog = QuestionCatalog::standard();
        let mut conv = Conversation::start();
        for _ in 0..3 {
            conv.advance(&catalog, "x").unwrap();
        }
        let raw = " Traffic Filtering,Threat Detection , VPN Support";
        conv.advance(&catalog, raw).unwrap();
        assert_eq!(conv.answer("features"), Some(raw));
    }

    #[test]
    fn log_tags_user_entries_with_answered_step() {
        let catalog = QuestionCatalog::standard();
        let mut conv = Conversation::start();
        conv.advance(&catalog, "vFirewall").unwrap();

        let log = conv.message_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], LogEntry::user("vFirewall", 1));
        assert_eq!(log[1].role, LogRole::System);
        assert_eq!(log[1].step, 2);
        assert_eq!(log[1].content, catalog.question(2).unwrap().prompt);
    }

    #[test]
    fn completion_notice_is_logged() {
        let catalog = QuestionCatalog::standard();
        let mut conv = Conversation::start();
        answer_all(&mut conv, &catalog);
        let last = conv.message_log().last().unwrap();
        assert_eq!(last.content, COMPLETION_NOTICE);
        assert_eq!(last.role, LogRole::System);
    }

    #[test]
    fn works_with_a_custom_catalog() {
        let rows: [(&str, &str, &[&str], bool); 2] =
            [("First?", "one", &["a"], false), ("Second?", "two", &["b"], true)];
        let catalog = QuestionCatalog::from_rows(&rows).unwrap();
        let mut conv = Conversation::start();
        assert_eq!(conv.advance(&catalog, "a").unwrap(), StepOutcome::Next(2));
        assert_eq!(conv.advance(&catalog, "b").unwrap(), StepOutcome::Completed);
    }

    proptest! {
        #[test]
        fn each_advance_increases_step_by_exactly_one(
            answers in proptest::collection::vec(".*", 1..12)
        ) {
            let catalog = QuestionCatalog::standard();
            let mut conv = Conversation::start();
            for answer in answers {
                let before = conv.current_step();
                match conv.advance(&catalog, answer.clone()) {
                    Ok(_) => {
                        prop_assert_eq!(conv.current_step(), before + 1);
                        let field = &catalog.question(before).unwrap().field;
                        prop_assert_eq!(conv.answer(field), Some(answer.as_str()));
                    }
                    Err(e) => {
                        prop_assert_eq!(e.code, ErrorCode::InvalidState);
                        prop_assert_eq!(conv.current_step(), before);
                    }
                }
                prop_assert!(conv.answers().len() < conv.current_step());
            }
        }
    }
}
