//! Keyword intent classifier.
//!
//! Each intent owns a Latin and an Arabic keyword list. Sets are tested in
//! [`Intent::PRIORITY`] order and the first set with any keyword contained in
//! the (lowercased) utterance wins; if none match the result is
//! [`Intent::Fallback`]. This is first-match, not best-match: an utterance
//! that mentions both contact details and prices is a `contact` question.
//!
//! Both lists are consulted whatever the active locale, since visitors on
//! the Arabic site routinely type English product words and vice versa.

use bayan_core::models::intent::Intent;
use bayan_core::models::locale::Locale;
use tracing::debug;

/// Keywords that select one intent.
#[derive(Debug)]
pub struct KeywordSet {
    pub intent: Intent,
    /// Lowercase Latin-script keywords.
    pub latin: &'static [&'static str],
    pub arabic: &'static [&'static str],
}

impl KeywordSet {
    /// `normalized` must already be lowercased.
    fn matches(&self, normalized: &str) -> bool {
        self.latin
            .iter()
            .chain(self.arabic.iter())
            .any(|keyword| normalized.contains(*keyword))
    }
}

/// All keyword sets, highest priority first.
pub static KEYWORD_SETS: [KeywordSet; 7] = [
    KeywordSet {
        intent: Intent::Contact,
        latin: &[
            "contact",
            "whatsapp",
            "phone number",
            "telephone",
            "call me",
            "call you",
            "call us",
            "give you a call",
            "email",
            "e-mail",
            "get in touch",
            "reach you",
            "reach out",
            "talk to",
            "speak to",
        ],
        arabic: &[
            "تواصل",
            "واتساب",
            "واتس",
            "اتصال",
            "اتصل",
            "رقم",
            "هاتف",
            "جوال",
            "ايميل",
            "إيميل",
            "البريد",
        ],
    },
    KeywordSet {
        intent: Intent::Pricing,
        latin: &[
            "price", "pricing", "cost", "package", "budget", "quote", "how much",
        ],
        arabic: &[
            "سعر",
            "أسعار",
            "اسعار",
            "تكلفة",
            "كلفة",
            "باقة",
            "باقات",
            "ميزانية",
            "كم يكلف",
        ],
    },
    KeywordSet {
        intent: Intent::Timeline,
        latin: &[
            "timeline",
            "how long",
            "deadline",
            "duration",
            "deliver",
            "turnaround",
            "how soon",
            "when can",
            "weeks",
        ],
        arabic: &[
            "المدة",
            "كم مدة",
            "مدة تنفيذ",
            "مدة التنفيذ",
            "متى",
            "وقت",
            "كم يوم",
            "أسبوع",
            "اسبوع",
            "تسليم",
        ],
    },
    KeywordSet {
        intent: Intent::Landing,
        latin: &["landing", "one page", "one-page", "single page", "single-page"],
        arabic: &["هبوط", "لاندنج", "لاندينج", "صفحة واحدة"],
    },
    KeywordSet {
        intent: Intent::Store,
        latin: &[
            "online store",
            "e-store",
            " store",
            "online shop",
            "shop online",
            " shop ",
            "e-commerce",
            "ecommerce",
            "sell online",
            "online sales",
            "shopping cart",
        ],
        arabic: &[
            "متجر",
            "متاجر",
            "تجارة إلكترونية",
            "تجارة الكترونية",
            "سلة مشتريات",
            "سلة التسوق",
            "بيع أونلاين",
        ],
    },
    KeywordSet {
        intent: Intent::System,
        latin: &[
            "system",
            "dashboard",
            "crm",
            "erp",
            "portal",
            "management",
            "admin panel",
            "booking",
            "inventory",
        ],
        arabic: &[
            "نظام",
            "أنظمة",
            "انظمة",
            "لوحة تحكم",
            "إدارة",
            "ادارة",
            "حجوزات",
        ],
    },
    KeywordSet {
        intent: Intent::Website,
        latin: &["website", "web site", "site", "web"],
        arabic: &["موقع", "مواقع", "ويب"],
    },
];

/// Map a visitor utterance to an intent.
///
/// Total over any input; callers reject empty text before getting here.
pub fn classify(utterance: &str, locale: Locale) -> Intent {
    let normalized = utterance.to_lowercase();

    let intent = KEYWORD_SETS
        .iter()
        .find(|set| set.matches(&normalized))
        .map(|set| set.intent)
        .unwrap_or(Intent::Fallback);

    debug!(%locale, %intent, "classified utterance");
    intent
}
