//! Static text generation. Pure string templating, no state and no
//! failure modes; kept separate so the handlers stay thin.

pub fn generate_lesson_plan(subject: &str, level: &str, topic: &str) -> String {
    format!(
        r#"## Lesson Plan: {subject} - {level} - {topic}

**Objectives:**
1. Students will be able to define key concepts related to {topic}.
2. Students will be able to apply formulas/principles of {topic} to solve problems.
3. Students will demonstrate understanding through practice questions.

**Materials:** Whiteboard, markers, worksheets, textbooks.

**Lesson Flow:**
1. **Introduction (10 min):**
   - Review previous topic.
   - Introduce {topic} with real-world examples.
   - Discuss learning objectives.
2. **Concept Explanation (20 min):**
   - Explain core theories and definitions.
   - Work through example problems.
3. **Guided Practice (15 min):**
   - Students attempt questions with teacher guidance.
4. **Independent Practice (15 min):**
   - Students work on worksheet questions.
5. **Conclusion & Q&A (10 min):**
   - Summarize key takeaways.
   - Address student questions.
   - Assign homework.

**Assessment:** Observation, worksheet completion, Q&A.
"#
    )
}

pub fn generate_worksheet(subject: &str, level: &str, topic: &str) -> String {
    format!(
        r#"## Worksheet: {subject} - {level} - {topic}

**Instructions:** Answer all questions. Show your working clearly.

**Section A: Multiple Choice Questions**
1. Which of the following best describes {topic}?
   a) Option A
   b) Option B
   c) Option C
   d) Option D
   *Suggested Answer: c)*

2. What is the primary function of [concept related to {topic}]?
   a) Option A
   b) Option B
   c) Option C
   d) Option D
   *Suggested Answer: a)*

**Section B: Structured Questions**
3. Explain in your own words the concept of {topic}. (3 marks)
   *Suggested Answer: [Detailed explanation of {topic}]*

4. A problem involves [scenario related to {topic}]. Calculate [value]. (4 marks)
   *Suggested Answer: [Step-by-step solution]*

5. Discuss two real-world applications of {topic}. (4 marks)
   *Suggested Answer: [Application 1 with explanation, Application 2 with explanation]*
"#
    )
}

pub fn generate_parent_update(student_name: &str, marks: &str, comments: &str) -> String {
    format!(
        r#"Dear Parents,

This is an update regarding {student_name}'s progress.

Recent Assessment Marks: {marks}

Teacher Comments:
{comments}

We encourage you to discuss these results with {student_name} and reach out if you have any questions.

Sincerely,
Class Teacher
"#
    )
}

/// One parsed line of the batch parent-update input.
#[derive(Debug, PartialEq)]
pub struct StudentLine {
    pub name: String,
    pub marks: String,
    pub comments: String,
}

/// Parse the "name, marks, comment, more comment..." batch input. Blank
/// lines and lines with fewer than three fields are skipped; everything
/// after the second comma is the comment.
pub fn parse_student_lines(input: &str) -> Vec<StudentLine> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            if parts.len() < 3 {
                return None;
            }
            Some(StudentLine {
                name: parts[0].to_string(),
                marks: parts[1].to_string(),
                comments: parts[2..].join(", "),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_plan_mentions_all_inputs() {
        let text = generate_lesson_plan("Physics", "Sec 2", "Kinematics");
        assert!(text.contains("Physics - Sec 2 - Kinematics"));
        assert!(text.contains("principles of Kinematics"));
    }

    #[test]
    fn worksheet_mentions_topic() {
        let text = generate_worksheet("Math", "P5", "Fractions");
        assert!(text.contains("## Worksheet: Math - P5 - Fractions"));
        assert!(text.contains("concept of Fractions"));
    }

    #[test]
    fn parent_update_mentions_student_and_marks() {
        let text = generate_parent_update("Wei Ling", "78/100", "Good progress");
        assert!(text.contains("Wei Ling's progress"));
        assert!(text.contains("78/100"));
        assert!(text.contains("Good progress"));
    }

    #[test]
    fn parses_well_formed_lines() {
        let lines = parse_student_lines("Alice, 80, steady, keep it up\n\nBob, 65, needs revision\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            StudentLine {
                name: "Alice".into(),
                marks: "80".into(),
                comments: "steady, keep it up".into(),
            }
        );
        assert_eq!(lines[1].comments, "needs revision");
    }

    #[test]
    fn skips_short_and_blank_lines() {
        let lines = parse_student_lines("just-a-name\nAlice, 80\n   \nBob, 65, ok\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Bob");
    }
}
