use std::collections::BTreeMap;

use crate::config::ToolConfig;
use crate::duration;
use crate::models::{
    AttributionSummary, FeedbackMessage, ImpactHighlight, Quote, Sentiment, SentimentBreakdown,
    ToolSentimentResult, TrendLabel,
};

const MAX_IMPACTS: usize = 5;
const MAX_CHALLENGES: usize = 3;
const CHALLENGE_EXCERPT_CHARS: usize = 100;

/// Maps a feedback message to the set of tools it talks about.
///
/// The matching strategy is deliberately swappable; keyword matching is the
/// default, but an external tagging pass can stand in without touching the
/// scoring below.
pub trait ToolClassifier {
    fn tools_for(&self, message: &FeedbackMessage) -> Vec<String>;
}

/// Default classifier: explicit tool tag match, else case-insensitive
/// keyword substring match against the message text.
pub struct KeywordClassifier {
    tools: Vec<(String, Vec<String>)>,
}

impl KeywordClassifier {
    pub fn from_tools(tools: &[ToolConfig]) -> Self {
        let tools = tools
            .iter()
            .map(|tool| {
                let keywords = tool
                    .keywords
                    .iter()
                    .map(|keyword| keyword.to_lowercase())
                    .collect();
                (tool.id.clone(), keywords)
            })
            .collect();
        Self { tools }
    }
}

impl ToolClassifier for KeywordClassifier {
    fn tools_for(&self, message: &FeedbackMessage) -> Vec<String> {
        let text = message.text.to_lowercase();
        let mut matched = Vec::new();

        for (id, keywords) in &self.tools {
            let tagged = message
                .tool
                .as_deref()
                .map_or(false, |tag| tag.eq_ignore_ascii_case(id));
            if tagged || keywords.iter().any(|keyword| text.contains(keyword.as_str())) {
                matched.push(id.clone());
            }
        }

        matched
    }
}

/// Attribute every message to zero or more tools. A message counts once per
/// matching tool, so the summed per-tool counts can exceed the unique count.
pub fn attribute_messages<'a>(
    messages: &'a [FeedbackMessage],
    classifier: &dyn ToolClassifier,
) -> (BTreeMap<String, Vec<&'a FeedbackMessage>>, AttributionSummary) {
    let mut by_tool: BTreeMap<String, Vec<&FeedbackMessage>> = BTreeMap::new();
    let mut attributed_messages = 0usize;
    let mut attribution_total = 0usize;

    for message in messages {
        let tools = classifier.tools_for(message);
        if !tools.is_empty() {
            attributed_messages += 1;
        }
        attribution_total += tools.len();
        for tool in tools {
            by_tool.entry(tool).or_default().push(message);
        }
    }

    let summary = AttributionSummary {
        total_messages: messages.len(),
        attributed_messages,
        attribution_total,
        multi_tool_messages: attribution_total - attributed_messages,
    };

    (by_tool, summary)
}

/// Score one tool's attributed feedback into a perceived-value result.
pub fn score_tool(tool_id: &str, messages: &[&FeedbackMessage]) -> ToolSentimentResult {
    let mut breakdown = SentimentBreakdown::default();
    for message in messages {
        match message.sentiment {
            Sentiment::Positive => breakdown.positive += 1,
            Sentiment::Neutral => breakdown.neutral += 1,
            Sentiment::Negative => breakdown.negative += 1,
        }
    }

    let total = messages.len();
    // Neutral default with zero feedback, not an error.
    let score = if total == 0 {
        50
    } else {
        let weighted = (breakdown.positive * 100 + breakdown.neutral * 50) as f64;
        (weighted / total as f64).round() as u32
    };

    ToolSentimentResult {
        tool: tool_id.to_string(),
        score,
        total_feedback: total,
        breakdown,
        themes: collect_themes(messages),
        top_impacts: collect_impacts(messages),
        challenges: collect_challenges(messages),
        quotes: collect_quotes(messages),
        trend: sentiment_trend(messages),
    }
}

/// Run attribution and scoring for every configured tool, in catalog order.
pub fn analyze_feedback(
    messages: &[FeedbackMessage],
    tools: &[ToolConfig],
    classifier: &dyn ToolClassifier,
) -> (Vec<ToolSentimentResult>, AttributionSummary) {
    let (by_tool, summary) = attribute_messages(messages, classifier);
    let empty: Vec<&FeedbackMessage> = Vec::new();

    let results = tools
        .iter()
        .map(|tool| {
            let attributed = by_tool.get(&tool.id).unwrap_or(&empty);
            score_tool(&tool.id, attributed)
        })
        .collect();

    (results, summary)
}

fn collect_themes(messages: &[&FeedbackMessage]) -> Vec<String> {
    let mut themes = Vec::new();
    for message in messages {
        for theme in &message.themes {
            if !themes.contains(theme) {
                themes.push(theme.clone());
            }
        }
    }
    themes
}

fn collect_impacts(messages: &[&FeedbackMessage]) -> Vec<ImpactHighlight> {
    messages
        .iter()
        .filter_map(|message| message.impact.as_ref())
        .take(MAX_IMPACTS)
        .map(|impact| ImpactHighlight {
            task: impact.task.clone(),
            before: impact.before.clone(),
            after: impact.after.clone(),
            reduction_percent: reduction_percent(&impact.before, &impact.after),
        })
        .collect()
}

/// Time reduction implied by a before/after pair, as a rounded percent.
/// `None` when either side fails to parse or the baseline is zero.
pub fn reduction_percent(before: &str, after: &str) -> Option<i64> {
    let before_minutes = duration::parse_duration_minutes(before)?;
    let after_minutes = duration::parse_duration_minutes(after)?;
    if before_minutes <= 0.0 {
        return None;
    }
    Some(((1.0 - after_minutes / before_minutes) * 100.0).round() as i64)
}

fn collect_challenges(messages: &[&FeedbackMessage]) -> Vec<String> {
    messages
        .iter()
        .filter(|message| message.sentiment == Sentiment::Negative)
        .take(MAX_CHALLENGES)
        .map(|message| {
            message
                .challenge
                .clone()
                .unwrap_or_else(|| excerpt(&message.text, CHALLENGE_EXCERPT_CHARS))
        })
        .collect()
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

/// Up to three quotes in fixed preference order: a positive voice with a
/// quantified win, a plain positive voice, then a critical one.
fn collect_quotes(messages: &[&FeedbackMessage]) -> Vec<Quote> {
    let mut quotes = Vec::new();

    let positive_with_impact = messages
        .iter()
        .find(|m| m.sentiment == Sentiment::Positive && m.impact.is_some());
    let positive_plain = messages
        .iter()
        .find(|m| m.sentiment == Sentiment::Positive && m.impact.is_none());
    let critical = messages
        .iter()
        .find(|m| m.sentiment == Sentiment::Negative || m.challenge.is_some());

    for message in [positive_with_impact, positive_plain, critical]
        .into_iter()
        .flatten()
    {
        quotes.push(Quote {
            text: message.text.clone(),
            author: message.author.clone(),
            sentiment: message.sentiment,
        });
    }

    quotes
}

/// Positive-ratio shift between the chronological first and second half.
pub fn sentiment_trend(messages: &[&FeedbackMessage]) -> TrendLabel {
    if messages.len() < 3 {
        return TrendLabel::InsufficientData;
    }

    let mut ordered: Vec<&FeedbackMessage> = messages.to_vec();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));
    let (first, second) = ordered.split_at(ordered.len() / 2);

    let delta = positive_ratio(second) - positive_ratio(first);
    if delta > 0.1 {
        TrendLabel::Improving
    } else if delta < -0.1 {
        TrendLabel::Declining
    } else {
        TrendLabel::Stable
    }
}

fn positive_ratio(messages: &[&FeedbackMessage]) -> f64 {
    if messages.is_empty() {
        return 0.0;
    }
    let positive = messages
        .iter()
        .filter(|message| message.sentiment == Sentiment::Positive)
        .count();
    positive as f64 / messages.len() as f64
}
