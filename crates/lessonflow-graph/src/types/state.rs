use serde::{Deserialize, Serialize};

/// State threaded through every node of one lesson-flow run
///
/// `user_query` is fixed at construction. `lesson_content` is rewritten by each
/// content-generation visit and `quiz_score` by each feedback visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonState {
    user_query: String,
    lesson_content: String,
    quiz_score: f64,
}

impl LessonState {
    pub fn new(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            lesson_content: String::new(),
            quiz_score: 0.0,
        }
    }

    pub fn user_query(&self) -> &str {
        &self.user_query
    }

    pub fn lesson_content(&self) -> &str {
        &self.lesson_content
    }

    pub fn quiz_score(&self) -> f64 {
        self.quiz_score
    }

    pub fn set_lesson_content(&mut self, content: impl Into<String>) {
        self.lesson_content = content.into();
    }

    pub fn set_quiz_score(&mut self, score: f64) {
        self.quiz_score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = LessonState::new("Explain photosynthesis");

        assert_eq!(state.user_query(), "Explain photosynthesis");
        assert_eq!(state.lesson_content(), "");
        assert_eq!(state.quiz_score(), 0.0);
    }

    #[test]
    fn test_setters_leave_query_untouched() {
        let mut state = LessonState::new("Fractions");
        state.set_lesson_content("Lesson on: Fractions");
        state.set_quiz_score(0.42);

        assert_eq!(state.user_query(), "Fractions");
        assert_eq!(state.lesson_content(), "Lesson on: Fractions");
        assert_eq!(state.quiz_score(), 0.42);
    }
}
