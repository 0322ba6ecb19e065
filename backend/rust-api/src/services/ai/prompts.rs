use std::fmt::Write;

use super::feedback::FeedbackInput;

pub fn question_prompt(topic: &str, count: usize) -> String {
    format!(
        r#"Generate {count} multiple choice questions about {topic}.
Each question should have exactly 4 options and indicate the correct answer index (0-3).
Return ONLY a valid JSON object in this exact format:
{{
  "questions": [
    {{
      "id": "1",
      "question": "Question text here?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": 0
    }}
  ]
}}
Make sure the questions are challenging but fair, and cover different aspects of {topic}."#
    )
}

/// Tutor-style feedback prompt. With per-question results every correct and
/// incorrect question is embedded; without them only the score summary is.
pub fn feedback_prompt(input: &FeedbackInput) -> String {
    let percentage = input.percentage();
    let mut prompt = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(
        prompt,
        "You are an encouraging and insightful tutor. A student just completed a {} quiz.\n",
        input.topic
    );
    let _ = writeln!(prompt, "Performance Summary:");
    let _ = writeln!(
        prompt,
        "- Score: {} out of {} ({}%)",
        input.score, input.total, percentage
    );
    let _ = writeln!(prompt, "- Correct answers: {}", input.score);
    let _ = writeln!(
        prompt,
        "- Incorrect answers: {}\n",
        input.total.saturating_sub(input.score)
    );

    if let Some(results) = input.detailed_results() {
        let correct: Vec<_> = results.iter().filter(|r| r.is_correct).collect();
        let incorrect: Vec<_> = results.iter().filter(|r| !r.is_correct).collect();

        if !correct.is_empty() {
            let _ = writeln!(prompt, "Questions the student answered CORRECTLY:");
            for (i, r) in correct.iter().enumerate() {
                let _ = writeln!(prompt, "{}. \"{}\"", i + 1, r.question);
                let _ = writeln!(prompt, "   Correct answer: {}", r.correct_option());
            }
            prompt.push('\n');
        }

        if !incorrect.is_empty() {
            let _ = writeln!(prompt, "Questions the student answered INCORRECTLY:");
            for (i, r) in incorrect.iter().enumerate() {
                let all_options = r
                    .options
                    .iter()
                    .enumerate()
                    .map(|(idx, opt)| {
                        let mark = if idx == r.correct_answer as usize { '✓' } else { '•' };
                        format!("{} {}", mark, opt)
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(prompt, "{}. Question: \"{}\"", i + 1, r.question);
                let _ = writeln!(
                    prompt,
                    "   Student selected: \"{}\"",
                    r.user_option().unwrap_or("No answer provided")
                );
                let _ = writeln!(prompt, "   Correct answer: \"{}\"", r.correct_option());
                let _ = writeln!(prompt, "   All options were: {}", all_options);
            }
            prompt.push('\n');
        }
    }

    let _ = writeln!(prompt, "Please provide personalized feedback that:");
    let _ = writeln!(
        prompt,
        "1. Starts with an encouraging opening about their {}% score",
        percentage
    );
    let _ = writeln!(
        prompt,
        "2. Highlights specific strengths (mention actual topics/questions they got right)"
    );
    let _ = writeln!(
        prompt,
        "3. Points out specific areas for improvement (reference actual questions they got wrong)"
    );
    let _ = writeln!(
        prompt,
        "4. Explains WHY the correct answers are right for the missed questions (brief explanations)"
    );
    let _ = writeln!(
        prompt,
        "5. Provides 2-3 actionable study tips specific to {}",
        input.topic
    );
    let _ = writeln!(prompt, "6. Ends with motivation and encouragement\n");
    let _ = writeln!(prompt, "Format your response with clear sections using these emojis:");
    let _ = writeln!(prompt, "- 🎯 for overall performance");
    let _ = writeln!(prompt, "- ✅ for strengths");
    let _ = writeln!(prompt, "- 📚 for areas to improve (with brief explanations)");
    let _ = writeln!(prompt, "- 💡 for study tips");
    let _ = writeln!(prompt, "- 🚀 for closing motivation\n");
    prompt.push_str(
        "Keep it conversational, specific, and around 200-300 words. \
         Be a supportive tutor who really analyzes their performance!",
    );

    prompt
}
