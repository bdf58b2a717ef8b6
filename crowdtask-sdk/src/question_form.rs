//! QuestionFormAnswers documents
//!
//! Assignments carry their answers as an XML string. Each `<Answer>` becomes
//! a [`QuestionFormAnswer`]; several selections for one question are joined
//! with the multi-choice delimiter so they decode as one multi-valued answer.

use crowdtask_core::{QuestionFormAnswer, MULTI_CHOICE_DELIMITER};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{SdkError, SdkResult};

const ANSWER: &[u8] = b"Answer";
const QUESTION_IDENTIFIER: &[u8] = b"QuestionIdentifier";

/// Elements whose text is an answer value.
fn is_value_element(name: &[u8]) -> bool {
    matches!(
        name,
        b"FreeText" | b"SelectionIdentifier" | b"OtherSelectionText" | b"UploadedFileKey"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Question,
    Value,
}

/// Answer being read.
#[derive(Debug, Default)]
struct PendingAnswer {
    qid: Option<String>,
    values: Vec<String>,
}

impl PendingAnswer {
    fn finish(self) -> Option<QuestionFormAnswer> {
        let qid = self.qid?;
        let fields = if self.values.is_empty() {
            Vec::new()
        } else {
            let delimiter = MULTI_CHOICE_DELIMITER.to_string();
            vec![self.values.join(delimiter.as_str())]
        };
        Some(QuestionFormAnswer::new(qid, fields))
    }
}

fn malformed(error: impl std::fmt::Display) -> SdkError {
    SdkError::AnswerDocument(error.to_string())
}

/// Parse every answer in `xml`. Answers without a question identifier are skipped.
///
/// Element names are matched without their namespace prefix; text and CDATA
/// sections inside one element are concatenated.
pub fn parse_answers(xml: &str) -> SdkResult<Vec<QuestionFormAnswer>> {
    let mut reader = Reader::from_str(xml);
    let mut answers = Vec::new();
    let mut pending: Option<PendingAnswer> = None;
    let mut capture: Option<Capture> = None;
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(element) => {
                let name = element.local_name();
                let name = name.as_ref();
                if name == ANSWER {
                    pending = Some(PendingAnswer::default());
                } else if pending.is_some() && name == QUESTION_IDENTIFIER {
                    capture = Some(Capture::Question);
                    text.clear();
                } else if pending.is_some() && is_value_element(name) {
                    capture = Some(Capture::Value);
                    text.clear();
                }
            }
            Event::Empty(element) => {
                if let Some(answer) = pending.as_mut() {
                    if is_value_element(element.local_name().as_ref()) {
                        answer.values.push(String::new());
                    }
                }
            }
            Event::Text(content) if capture.is_some() => {
                text.push_str(&content.unescape().map_err(malformed)?);
            }
            Event::CData(content) if capture.is_some() => {
                text.push_str(&content.decode().map_err(malformed)?);
            }
            Event::End(element) => {
                let name = element.local_name();
                let name = name.as_ref();
                if name == ANSWER {
                    if let Some(answer) = pending.take().and_then(PendingAnswer::finish) {
                        answers.push(answer);
                    }
                    capture = None;
                } else if let (Some(answer), Some(kind)) = (pending.as_mut(), capture) {
                    match kind {
                        Capture::Question if name == QUESTION_IDENTIFIER => {
                            answer.qid = Some(text.trim().to_string());
                            capture = None;
                        }
                        Capture::Value if is_value_element(name) => {
                            answer.values.push(std::mem::take(&mut text));
                            capture = None;
                        }
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(answers)
}
