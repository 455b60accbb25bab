//! Pre-filled messages offered as one-tap shortcuts

/// A shortcut: `label` is shown, `text` is what gets submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickReply {
    pub label: &'static str,
    pub text: &'static str,
}

pub const QUICK_REPLIES: &[QuickReply] = &[
    QuickReply {
        label: "I'm feeling anxious",
        text: "I'm feeling anxious today",
    },
    QuickReply {
        label: "Help with stress",
        text: "I need help coping with stress",
    },
    QuickReply {
        label: "I'm doing well",
        text: "I'm having a good day",
    },
    QuickReply {
        label: "Feeling overwhelmed",
        text: "I feel overwhelmed",
    },
];

/// Look up a shortcut by its 1-based position
pub fn by_number(n: usize) -> Option<&'static QuickReply> {
    n.checked_sub(1).and_then(|i| QUICK_REPLIES.get(i))
}
