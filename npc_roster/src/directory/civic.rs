//! Built-in civic-education roster.

use super::NpcDirectory;
use crate::personality::{ChatMessages, NpcPersonality, NpcTriggerType::*, SkillLevel};

impl NpcDirectory {
    /// The default roster of civic-education NPCs.
    pub fn civic() -> Self {
        let mut directory = Self::new();
        for personality in civic_roster() {
            directory.order.push(personality.id.clone());
            directory
                .personalities
                .insert(personality.id.clone(), personality);
        }
        directory
    }
}

fn civic_roster() -> Vec<NpcPersonality> {
    vec![
        NpcPersonality::new("news_junkie", "Sam", "📰")
            .with_skill_level(SkillLevel::Intermediate)
            .with_specialties(&["current events", "media literacy", "news"])
            .with_weaknesses(&["history", "constitution"])
            .with_accuracy(60, 78)
            .with_response_time(4.0, 10.0)
            .with_chat_messages(
                ChatMessages::default()
                    .with_lines(OnCorrectAnswer, &["Called it! I read about this last week."])
                    .with_lines(OnIncorrectAnswer, &["Huh, the headlines made it sound different."])
                    .with_lines(OnHelpRequest, &["There was a solid explainer on this in the news recently."])
                    .with_lines(
                        OnEncouragementNeeded,
                        &["Anyone catch the news today? Some wild stuff in Congress."],
                    )
                    .with_lines(OnGameStart, &["Let's see if all my doomscrolling pays off."])
                    .with_lines(OnGameEnd, &["Good game! Time to go refresh my feeds."]),
            ),
        NpcPersonality::new("civics_teacher", "Ms. Rodriguez", "👩‍🏫")
            .with_skill_level(SkillLevel::Expert)
            .with_specialties(&["government", "constitution", "history"])
            .with_weaknesses(&["pop culture"])
            .with_accuracy(82, 95)
            .with_response_time(8.0, 16.0)
            .with_chat_messages(
                ChatMessages::default()
                    .with_lines(OnCorrectAnswer, &["Nicely reasoned, everyone."])
                    .with_lines(OnIncorrectAnswer, &["Good try. Mistakes are how we learn."])
                    .with_lines(
                        OnHelpRequest,
                        &["Great question. Let's break it down step by step."],
                    )
                    .with_lines(
                        OnEncouragementNeeded,
                        &["Every expert started as a beginner. You're doing fine."],
                    )
                    .with_lines(OnGameStart, &["Remember, the goal is to learn, not just to win."])
                    .with_lines(OnGameEnd, &["Well played. I hope you learned something new."]),
            ),
        NpcPersonality::new("local_organizer", "Jordan", "📣")
            .with_skill_level(SkillLevel::Advanced)
            .with_specialties(&["local", "voting", "community"])
            .with_weaknesses(&["federal courts"])
            .with_accuracy(70, 85)
            .with_response_time(6.0, 12.0)
            .with_chat_messages(
                ChatMessages::default()
                    .with_lines(OnCorrectAnswer, &["Yes! That's the kind of thing that matters at city hall."])
                    .with_lines(OnHelpRequest, &["I deal with this at council meetings, happy to explain."])
                    .with_lines(
                        OnEncouragementNeeded,
                        &["We're all in this together. Keep going!"],
                    )
                    .with_lines(OnGameEnd, &["Now go show up at your next council meeting!"]),
            ),
        NpcPersonality::new("political_scholar", "Dr. Chen", "🎓")
            .with_skill_level(SkillLevel::Expert)
            .with_specialties(&["government", "constitution", "political theory", "history"])
            .with_weaknesses(&["local"])
            .with_accuracy(85, 97)
            .with_response_time(10.0, 20.0)
            .with_chat_messages(
                ChatMessages::default()
                    .with_lines(OnCorrectAnswer, &["Precisely. The historical record supports that."])
                    .with_lines(OnIncorrectAnswer, &["A common misconception, actually."])
                    .with_lines(OnHelpRequest, &["The scholarship on this is quite clear, let me summarize."])
                    .with_lines(OnGameStart, &["A fine set of questions today, I suspect."]),
            ),
        NpcPersonality::new("curious_student", "Alex", "🤔")
            .with_skill_level(SkillLevel::Beginner)
            .with_specialties(&["civic participation"])
            .with_weaknesses(&["constitution", "courts"])
            .with_accuracy(40, 60)
            .with_response_time(5.0, 14.0)
            .with_chat_messages(
                ChatMessages::default()
                    .with_lines(OnCorrectAnswer, &["Wait, I actually got that? Nice!"])
                    .with_lines(OnIncorrectAnswer, &["Oh no, I totally guessed on that one."])
                    .with_lines(
                        OnEncouragementNeeded,
                        &["Is anyone else finding these kind of tricky?", "What topic is everyone best at?"],
                    )
                    .with_lines(OnGameStart, &["I'm here to learn, go easy on me!"]),
            ),
        NpcPersonality::new("activist_advocate", "Riley", "✊")
            .with_skill_level(SkillLevel::Intermediate)
            .with_specialties(&["civil rights", "voting", "advocacy"])
            .with_weaknesses(&["economics"])
            .with_accuracy(60, 80)
            .with_response_time(4.0, 9.0)
            .with_chat_messages(
                ChatMessages::default()
                    .with_lines(OnCorrectAnswer, &["Knowledge is power!"])
                    .with_lines(
                        OnEncouragementNeeded,
                        &["This stuff affects all of us, so every answer counts!"],
                    )
                    .with_lines(OnGameEnd, &["Now let's put this knowledge to work."]),
            ),
        NpcPersonality::new("new_citizen", "Maria", "🌟")
            .with_skill_level(SkillLevel::Intermediate)
            .with_specialties(&["naturalization", "constitution"])
            .with_weaknesses(&["local"])
            .with_accuracy(65, 85)
            .with_response_time(7.0, 15.0)
            .with_chat_messages(
                ChatMessages::default()
                    .with_lines(OnCorrectAnswer, &["I studied this for my citizenship test!"])
                    .with_lines(
                        OnEncouragementNeeded,
                        &["I was nervous about these questions too. You'll get there!"],
                    )
                    .with_lines(OnGameStart, &["Hello everyone! Excited to play."]),
            ),
        NpcPersonality::new("constitutional_lawyer", "Priya", "⚖️")
            .with_skill_level(SkillLevel::Expert)
            .with_specialties(&["constitution", "courts", "civil rights"])
            .with_weaknesses(&["local"])
            .with_accuracy(85, 96)
            .with_response_time(9.0, 18.0)
            .with_chat_messages(
                ChatMessages::default()
                    .with_lines(OnCorrectAnswer, &["Sustained. That's correct."])
                    .with_lines(OnHelpRequest, &["Let's look at what the text actually says."]),
            ),
        NpcPersonality::new("retired_civil_servant", "Frank", "🏛️")
            .with_skill_level(SkillLevel::Advanced)
            .with_specialties(&["government", "federal agencies", "budget"])
            .with_weaknesses(&["media literacy"])
            .with_accuracy(72, 88)
            .with_response_time(12.0, 22.0)
            .with_chat_messages(
                ChatMessages::default()
                    .with_lines(OnCorrectAnswer, &["Thirty years in government taught me that one."])
                    .with_lines(OnHelpRequest, &["Here's how it actually works from the inside."]),
            ),
        NpcPersonality::new("election_volunteer", "Dee", "🗳️")
            .with_skill_level(SkillLevel::Advanced)
            .with_specialties(&["voting", "elections"])
            .with_weaknesses(&["courts"])
            .with_accuracy(70, 88)
            .with_response_time(6.0, 13.0)
            .with_chat_messages(
                ChatMessages::default()
                    .with_lines(OnCorrectAnswer, &["That's right, and I've worked the polls to prove it!"])
                    .with_lines(OnHelpRequest, &["I've worked a lot of elections, here's how it goes."]),
            ),
    ]
}
