//! Habit coaching advice from the Claude Messages API.
//!
//! Advice is best effort: an unconfigured key, a transport error or an
//! unexpected response shape all yield the canned fallback text instead of
//! an error.

use serde::Serialize;

use crate::config::Config;
use crate::models::habit::HabitSnapshot;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const HABIT_ADVICE_MAX_TOKENS: u32 = 1000;

pub const FALLBACK_HABIT_ADVICE: &str = r#"**Habit Building Advice**

**Great Progress!**
You're building positive momentum! Every day you complete your habit, you're rewiring your brain and getting closer to making it automatic.

**Tips to Maintain Your Streak:**
1. **Stack habits** - Attach your new habit to an existing routine (e.g., "After I brush my teeth, I will...")
2. **Start small** - If you miss a day, don't aim for perfection. Aim for consistency. Even 5 minutes counts!
3. **Track visibly** - Mark your calendar or use a habit tracker to visualize your progress
4. **Prepare your environment** - Make it easy to do the habit and hard to skip it

**Motivational Wisdom:**
"Success is the sum of small efforts repeated day in and day out." - Robert Collier

Remember: Missing one day doesn't break a habit. Giving up does. Keep going!

*Note: Claude AI is not configured. Configure CLAUDE_API_KEY for personalized habit coaching.*"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceSource {
    Claude,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub text: String,
    pub source: AdviceSource,
}

impl Advice {
    fn fallback() -> Self {
        Self {
            text: FALLBACK_HABIT_ADVICE.to_string(),
            source: AdviceSource::Fallback,
        }
    }
}

pub fn habit_advice_prompt(habit: &HabitSnapshot) -> String {
    format!(
        r#"You are a habit-building coach. A user is working on building the following habit:

Habit: {}
Frequency: {}
Current Streak: {} days
Longest Streak: {} days
Total Completions: {}

Please provide:
1. Encouragement based on their current progress (2-3 sentences)
2. 2-3 specific tips to maintain or improve their streak
3. A motivational quote or advice to keep them going

Keep the tone positive, supportive, and actionable."#,
        habit.name,
        habit.frequency,
        habit.current_streak,
        habit.longest_streak,
        habit.total_completions,
    )
}

pub async fn generate_habit_advice(config: &Config, habit: &HabitSnapshot) -> Advice {
    if !config.claude_configured() {
        tracing::warn!("Claude API key not configured, returning fallback habit advice");
        return Advice::fallback();
    }

    let prompt = habit_advice_prompt(habit);
    match call_claude(config, &prompt, HABIT_ADVICE_MAX_TOKENS).await {
        Ok(text) => Advice {
            text,
            source: AdviceSource::Claude,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Claude API unavailable, using fallback habit advice");
            Advice::fallback()
        }
    }
}

async fn call_claude(config: &Config, prompt: &str, max_tokens: u32) -> Result<String, anyhow::Error> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let response = client
        .post(&config.claude_api_url)
        .header("x-api-key", &config.claude_api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "model": config.claude_model,
            "max_tokens": max_tokens,
            "messages": [{
                "role": "user",
                "content": prompt
            }]
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Claude API error {}: {}", status, body);
    }

    let body: serde_json::Value = response.json().await?;
    extract_text(&body).ok_or_else(|| anyhow::anyhow!("Unexpected Claude API response format"))
}

fn extract_text(body: &serde_json::Value) -> Option<String> {
    body["content"][0]["text"].as_str().map(str::to_string)
}
