//! Client-side form validation.
//!
//! Each validator runs before the corresponding request is sent and returns the
//! message the form shows inline. Validators that accept raw text return the
//! normalized request body on success.

use crate::api::models::{
    Difficulty, FlashcardDraft, QuestionDraft, QuestionSource, RegisterRequest,
};
use crate::error::ValidationError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Largest PDF the generation endpoint accepts.
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

/// Raw register form input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// `YYYY-MM-DD`, may be empty.
    pub target_exam_date: String,
    pub daily_study_hours: Option<u8>,
}

pub fn validate_register(form: &RegisterForm) -> Result<RegisterRequest, ValidationError> {
    let email = form.email.trim();
    let full_name = form.full_name.trim();
    if email.is_empty() || form.password.is_empty() || full_name.is_empty() {
        return Err(ValidationError::new("Please fill in all required fields"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::field(
            "email",
            "Please enter a valid email address",
        ));
    }

    let target_exam_date = match form.target_exam_date.trim() {
        "" => None,
        raw => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            ValidationError::field("targetExamDate", "Target exam date must be YYYY-MM-DD")
        })?),
    };

    if let Some(hours) = form.daily_study_hours
        && !(1..=24).contains(&hours)
    {
        return Err(ValidationError::field(
            "dailyStudyHours",
            "Daily study hours must be between 1 and 24",
        ));
    }

    Ok(RegisterRequest {
        email: email.to_string(),
        password: form.password.clone(),
        full_name: full_name.to_string(),
        target_exam_date,
        daily_study_hours: form.daily_study_hours,
    })
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::new("Please enter your email and password"));
    }
    Ok(())
}

/// Returns the trimmed topic name.
pub fn validate_topic_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::field("name", "Topic name is required."));
    }
    Ok(name.to_string())
}

/// Raw add-question form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionForm {
    pub topic_id: String,
    pub text: String,
    pub choices: Vec<String>,
    pub correct_answer_index: usize,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub category: String,
    /// Comma separated.
    pub tags: String,
}

/// Validate and normalize a manually entered question.
///
/// Blank choices are dropped; the correct index must point at a kept choice.
pub fn validate_question(form: &QuestionForm) -> Result<QuestionDraft, ValidationError> {
    if form.topic_id.trim().is_empty() {
        return Err(ValidationError::field("topicId", "Please select a topic"));
    }
    let text = form.text.trim();
    if text.is_empty() {
        return Err(ValidationError::field("text", "Question text is required"));
    }

    let mut correct = None;
    let mut choices = Vec::with_capacity(form.choices.len());
    for (idx, choice) in form.choices.iter().enumerate() {
        let choice = choice.trim();
        if choice.is_empty() {
            continue;
        }
        if idx == form.correct_answer_index {
            correct = Some(choices.len());
        }
        choices.push(choice.to_string());
    }

    if choices.len() < 2 {
        return Err(ValidationError::field(
            "choices",
            "Provide at least two answer choices",
        ));
    }
    let Some(correct_answer_index) = correct else {
        return Err(ValidationError::field(
            "correctAnswerIndex",
            "Select which choice is correct",
        ));
    };

    Ok(QuestionDraft {
        topic_id: form.topic_id.trim().to_string(),
        text: text.to_string(),
        choices,
        correct_answer_index,
        explanation: non_empty(&form.explanation),
        difficulty: form.difficulty,
        source: QuestionSource::Manual,
        tags: split_tags(&form.tags),
        category: non_empty(&form.category),
    })
}

pub fn validate_flashcard(
    topic_id: Option<&str>,
    front: &str,
    back: &str,
    category: &str,
) -> Result<FlashcardDraft, ValidationError> {
    let front = front.trim();
    let back = back.trim();
    if front.is_empty() || back.is_empty() {
        return Err(ValidationError::new(
            "Both the front and back of the card are required",
        ));
    }
    Ok(FlashcardDraft {
        topic_id: topic_id.and_then(non_empty),
        front: front.to_string(),
        back: back.to_string(),
        category: non_empty(category),
    })
}

/// A PDF is accepted when either its content type or its extension says so.
pub fn validate_pdf_upload(
    file_name: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<(), ValidationError> {
    if size == 0 {
        return Err(ValidationError::field("file", "PDF file is required."));
    }
    let is_pdf_type = content_type.is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"));
    let is_pdf_name = file_name.to_ascii_lowercase().ends_with(".pdf");
    if !is_pdf_type && !is_pdf_name {
        return Err(ValidationError::field(
            "file",
            "Only PDF files are supported.",
        ));
    }
    if size > MAX_PDF_BYTES {
        return Err(ValidationError::field(
            "file",
            "File size must be less than 10MB.",
        ));
    }
    Ok(())
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    fn register_form() -> RegisterForm {
        RegisterForm {
            full_name: " Maria Santos ".into(),
            email: "maria@example.com".into(),
            password: "secret".into(),
            target_exam_date: "2026-11-20".into(),
            daily_study_hours: Some(2),
        }
    }

    #[test]
    fn test_register_valid() {
        let request = validate_register(&register_form()).unwrap();
        check!(request.full_name == "Maria Santos");
        check!(request.target_exam_date == NaiveDate::from_ymd_opt(2026, 11, 20));
        check!(request.daily_study_hours == Some(2));
    }

    #[rstest]
    #[case::no_email(RegisterForm { email: String::new(), ..register_form() }, None)]
    #[case::no_password(RegisterForm { password: String::new(), ..register_form() }, None)]
    #[case::blank_name(RegisterForm { full_name: "   ".into(), ..register_form() }, None)]
    #[case::bad_email(RegisterForm { email: "maria".into(), ..register_form() }, Some("email"))]
    #[case::bad_date(RegisterForm { target_exam_date: "20/11/2026".into(), ..register_form() }, Some("targetExamDate"))]
    #[case::zero_hours(RegisterForm { daily_study_hours: Some(0), ..register_form() }, Some("dailyStudyHours"))]
    #[case::too_many_hours(RegisterForm { daily_study_hours: Some(25), ..register_form() }, Some("dailyStudyHours"))]
    fn test_register_rejects(#[case] form: RegisterForm, #[case] field: Option<&str>) {
        let_assert!(Err(err) = validate_register(&form));
        check!(err.field == field);
    }

    #[test]
    fn test_register_missing_fields_message() {
        let form = RegisterForm::default();
        let_assert!(Err(err) = validate_register(&form));
        check!(err.to_string() == "Please fill in all required fields");
    }

    #[rstest]
    #[case("", "pw", false)]
    #[case("a@b.c", "", false)]
    #[case("a@b.c", "pw", true)]
    fn test_login(#[case] email: &str, #[case] password: &str, #[case] ok: bool) {
        check!(validate_login(email, password).is_ok() == ok);
    }

    #[test]
    fn test_topic_name() {
        check!(validate_topic_name("  Abnormal Psychology ").unwrap() == "Abnormal Psychology");
        let_assert!(Err(err) = validate_topic_name("   "));
        check!(err.to_string() == "Topic name is required.");
    }

    fn question_form() -> QuestionForm {
        QuestionForm {
            topic_id: "t1".into(),
            text: "Which lobe handles vision?".into(),
            choices: vec!["Frontal".into(), "  ".into(), "Occipital".into(), "Temporal".into()],
            correct_answer_index: 2,
            explanation: String::new(),
            difficulty: Difficulty::Easy,
            category: " Biopsych ".into(),
            tags: "brain, , lobes".into(),
        }
    }

    #[test]
    fn test_question_reindexes_after_dropping_blank_choices() {
        let draft = validate_question(&question_form()).unwrap();
        check!(draft.choices == vec!["Frontal", "Occipital", "Temporal"]);
        check!(draft.correct_answer_index == 1);
        check!(draft.source == QuestionSource::Manual);
        check!(draft.explanation.is_none());
        check!(draft.category.as_deref() == Some("Biopsych"));
        check!(draft.tags == vec!["brain", "lobes"]);
    }

    #[rstest]
    #[case::blank_correct(QuestionForm { correct_answer_index: 1, ..question_form() }, "correctAnswerIndex")]
    #[case::out_of_range(QuestionForm { correct_answer_index: 9, ..question_form() }, "correctAnswerIndex")]
    #[case::one_choice(QuestionForm { choices: vec!["Only".into()], correct_answer_index: 0, ..question_form() }, "choices")]
    #[case::no_text(QuestionForm { text: " ".into(), ..question_form() }, "text")]
    #[case::no_topic(QuestionForm { topic_id: String::new(), ..question_form() }, "topicId")]
    fn test_question_rejects(#[case] form: QuestionForm, #[case] field: &str) {
        let_assert!(Err(err) = validate_question(&form));
        check!(err.field == Some(field));
    }

    #[test]
    fn test_flashcard() {
        let draft = validate_flashcard(Some(""), " Front ", "Back", "").unwrap();
        check!(draft.front == "Front");
        check!(draft.topic_id.is_none());
        check!(draft.category.is_none());
        check!(validate_flashcard(None, "Front", " ", "").is_err());
    }

    #[rstest]
    #[case("notes.PDF", None, 10, true)]
    #[case("notes", Some("application/pdf"), 10, true)]
    #[case("notes.docx", Some("application/msword"), 10, false)]
    #[case("notes.pdf", None, 0, false)]
    #[case("notes.pdf", None, MAX_PDF_BYTES + 1, false)]
    fn test_pdf_upload(
        #[case] name: &str,
        #[case] content_type: Option<&str>,
        #[case] size: usize,
        #[case] ok: bool,
    ) {
        check!(validate_pdf_upload(name, content_type, size).is_ok() == ok);
    }
}
