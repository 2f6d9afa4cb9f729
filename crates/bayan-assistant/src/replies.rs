//! Bilingual reply table for rule-based mode.
//!
//! Every `(intent, locale)` pair maps to one fixed text and at most two
//! suggested actions. Internal actions point at `/{locale}/{page}`; WhatsApp
//! actions carry a prefilled message matching the question that was asked.

use bayan_core::links::pages;
use bayan_core::models::action::Action;
use bayan_core::models::intent::Intent;
use bayan_core::models::locale::Locale;
use bayan_core::models::reply::ReplyPayload;

/// One suggested action before it is bound to a locale.
enum ActionTemplate {
    Page {
        label: &'static str,
        page: &'static str,
    },
    Whatsapp {
        label: &'static str,
        message: &'static str,
    },
}

impl ActionTemplate {
    fn build(&self, locale: Locale) -> Action {
        match self {
            ActionTemplate::Page { label, page } => Action::internal(*label, locale, page),
            ActionTemplate::Whatsapp { label, message } => Action::whatsapp(*label, message),
        }
    }
}

struct ReplyTemplate {
    text: &'static str,
    actions: &'static [ActionTemplate],
}

impl ReplyTemplate {
    fn build(&self, locale: Locale) -> ReplyPayload {
        ReplyPayload {
            text: self.text.to_string(),
            actions: self.actions.iter().map(|a| a.build(locale)).collect(),
        }
    }
}

// ── English ──────────────────────────────────────────────────────────────────

const EN_CONTACT: ReplyTemplate = ReplyTemplate {
    text: "You can reach our team directly on WhatsApp, or leave your details on the Contact page and we'll get back to you within one business day.",
    actions: &[
        ActionTemplate::Whatsapp {
            label: "Chat on WhatsApp",
            message: "Hello, I'd like to talk to your team about a project.",
        },
        ActionTemplate::Page {
            label: "Contact page",
            page: pages::CONTACT,
        },
    ],
};

const EN_PRICING: ReplyTemplate = ReplyTemplate {
    text: "Our packages start with a fixed-price landing page and scale up to custom stores and business systems.\nYou'll find every package and what it includes on the Pricing page, and the full list of services next to it.",
    actions: &[
        ActionTemplate::Page {
            label: "View pricing",
            page: pages::PRICING,
        },
        ActionTemplate::Page {
            label: "Our services",
            page: pages::SERVICES,
        },
    ],
};

const EN_TIMELINE: ReplyTemplate = ReplyTemplate {
    text: "Typical timelines:\n• Landing page: 5–7 days\n• Business website: 2–3 weeks\n• Online store: 3–5 weeks\n• Custom system: scoped per project\nTell us about your project and we'll confirm a delivery date.",
    actions: &[
        ActionTemplate::Whatsapp {
            label: "Ask about timing",
            message: "Hello, I'd like an estimated timeline for my project.",
        },
        ActionTemplate::Page {
            label: "Contact us",
            page: pages::CONTACT,
        },
    ],
};

const EN_LANDING: ReplyTemplate = ReplyTemplate {
    text: "We build fast, conversion-focused landing pages for campaigns and product launches, in Arabic, English, or both.",
    actions: &[
        ActionTemplate::Page {
            label: "Landing page service",
            page: pages::SERVICES,
        },
        ActionTemplate::Whatsapp {
            label: "Request a landing page",
            message: "Hello, I'm interested in a landing page.",
        },
    ],
};

const EN_STORE: ReplyTemplate = ReplyTemplate {
    text: "We build online stores with payments, shipping and an easy product dashboard. Have a look at stores we've launched.",
    actions: &[
        ActionTemplate::Page {
            label: "See our work",
            page: pages::PORTFOLIO,
        },
        ActionTemplate::Whatsapp {
            label: "Start a store",
            message: "Hello, I'd like to build an online store.",
        },
    ],
};

const EN_SYSTEM: ReplyTemplate = ReplyTemplate {
    text: "We design custom systems: booking, CRM, inventory and admin dashboards, tailored to how your business actually works.",
    actions: &[
        ActionTemplate::Page {
            label: "Our services",
            page: pages::SERVICES,
        },
        ActionTemplate::Whatsapp {
            label: "Discuss a system",
            message: "Hello, I'd like to discuss a custom system for my business.",
        },
    ],
};

const EN_WEBSITE: ReplyTemplate = ReplyTemplate {
    text: "We build bilingual business websites that are fast, mobile-first and easy to update. Browse our portfolio or compare packages.",
    actions: &[
        ActionTemplate::Page {
            label: "Portfolio",
            page: pages::PORTFOLIO,
        },
        ActionTemplate::Page {
            label: "Pricing",
            page: pages::PRICING,
        },
    ],
};

const EN_FALLBACK: ReplyTemplate = ReplyTemplate {
    text: "I can help with our services, pricing, timelines, or getting in touch with the team. What would you like to know?",
    actions: &[],
};

// ── Arabic ───────────────────────────────────────────────────────────────────

const AR_CONTACT: ReplyTemplate = ReplyTemplate {
    text: "يمكنك التواصل مع فريقنا مباشرة عبر واتساب، أو ترك بياناتك في صفحة التواصل وسنعود إليك خلال يوم عمل واحد.",
    actions: &[
        ActionTemplate::Whatsapp {
            label: "تحدث معنا عبر واتساب",
            message: "مرحباً، أود التحدث مع فريقكم بخصوص مشروع.",
        },
        ActionTemplate::Page {
            label: "صفحة التواصل",
            page: pages::CONTACT,
        },
    ],
};

const AR_PRICING: ReplyTemplate = ReplyTemplate {
    text: "تبدأ باقاتنا بصفحة هبوط بسعر ثابت وتصل إلى المتاجر والأنظمة المخصصة.\nستجد تفاصيل كل باقة في صفحة الأسعار، وقائمة خدماتنا كاملة بجانبها.",
    actions: &[
        ActionTemplate::Page {
            label: "عرض الأسعار",
            page: pages::PRICING,
        },
        ActionTemplate::Page {
            label: "خدماتنا",
            page: pages::SERVICES,
        },
    ],
};

const AR_TIMELINE: ReplyTemplate = ReplyTemplate {
    text: "المدد المعتادة:\n• صفحة هبوط: ٥–٧ أيام\n• موقع تعريفي: ٢–٣ أسابيع\n• متجر إلكتروني: ٣–٥ أسابيع\n• نظام مخصص: حسب نطاق المشروع\nأخبرنا عن مشروعك لنؤكد لك موعد التسليم.",
    actions: &[
        ActionTemplate::Whatsapp {
            label: "اسأل عن المدة",
            message: "مرحباً، أود معرفة المدة المتوقعة لتنفيذ مشروعي.",
        },
        ActionTemplate::Page {
            label: "تواصل معنا",
            page: pages::CONTACT,
        },
    ],
};

const AR_LANDING: ReplyTemplate = ReplyTemplate {
    text: "نصمم صفحات هبوط سريعة تركّز على التحويل للحملات الإعلانية وإطلاق المنتجات، بالعربية أو الإنجليزية أو كليهما.",
    actions: &[
        ActionTemplate::Page {
            label: "خدمة صفحات الهبوط",
            page: pages::SERVICES,
        },
        ActionTemplate::Whatsapp {
            label: "اطلب صفحة هبوط",
            message: "مرحباً، أنا مهتم بصفحة هبوط.",
        },
    ],
};

const AR_STORE: ReplyTemplate = ReplyTemplate {
    text: "نبني متاجر إلكترونية متكاملة مع الدفع والشحن ولوحة سهلة لإدارة المنتجات. اطّلع على متاجر أطلقناها.",
    actions: &[
        ActionTemplate::Page {
            label: "شاهد أعمالنا",
            page: pages::PORTFOLIO,
        },
        ActionTemplate::Whatsapp {
            label: "ابدأ متجرك",
            message: "مرحباً، أود إنشاء متجر إلكتروني.",
        },
    ],
};

const AR_SYSTEM: ReplyTemplate = ReplyTemplate {
    text: "نطوّر أنظمة مخصصة: الحجوزات، إدارة العملاء، المخزون ولوحات التحكم، مصممة حسب طريقة عمل نشاطك.",
    actions: &[
        ActionTemplate::Page {
            label: "خدماتنا",
            page: pages::SERVICES,
        },
        ActionTemplate::Whatsapp {
            label: "ناقش نظامك",
            message: "مرحباً، أود مناقشة نظام مخصص لنشاطي.",
        },
    ],
};

const AR_WEBSITE: ReplyTemplate = ReplyTemplate {
    text: "نبني مواقع تعريفية ثنائية اللغة، سريعة ومتوافقة مع الجوال وسهلة التحديث. تصفح أعمالنا أو قارن الباقات.",
    actions: &[
        ActionTemplate::Page {
            label: "أعمالنا",
            page: pages::PORTFOLIO,
        },
        ActionTemplate::Page {
            label: "الأسعار",
            page: pages::PRICING,
        },
    ],
};

const AR_FALLBACK: ReplyTemplate = ReplyTemplate {
    text: "يمكنني مساعدتك في خدماتنا، الأسعار، مدة التنفيذ، أو التواصل مع الفريق. بماذا تود أن تبدأ؟",
    actions: &[],
};

fn template(intent: Intent, locale: Locale) -> &'static ReplyTemplate {
    match (intent, locale) {
        (Intent::Contact, Locale::En) => &EN_CONTACT,
        (Intent::Pricing, Locale::En) => &EN_PRICING,
        (Intent::Timeline, Locale::En) => &EN_TIMELINE,
        (Intent::Landing, Locale::En) => &EN_LANDING,
        (Intent::Store, Locale::En) => &EN_STORE,
        (Intent::System, Locale::En) => &EN_SYSTEM,
        (Intent::Website, Locale::En) => &EN_WEBSITE,
        (Intent::Fallback, Locale::En) => &EN_FALLBACK,
        (Intent::Contact, Locale::Ar) => &AR_CONTACT,
        (Intent::Pricing, Locale::Ar) => &AR_PRICING,
        (Intent::Timeline, Locale::Ar) => &AR_TIMELINE,
        (Intent::Landing, Locale::Ar) => &AR_LANDING,
        (Intent::Store, Locale::Ar) => &AR_STORE,
        (Intent::System, Locale::Ar) => &AR_SYSTEM,
        (Intent::Website, Locale::Ar) => &AR_WEBSITE,
        (Intent::Fallback, Locale::Ar) => &AR_FALLBACK,
    }
}

/// The canned reply for `intent` in `locale`.
pub fn resolve(intent: Intent, locale: Locale) -> ReplyPayload {
    template(intent, locale).build(locale)
}

/// Opening message of a fresh conversation.
pub fn greeting(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Hi! 👋 I'm the site assistant. Ask me about our services, pricing, or how long a project takes.",
        Locale::Ar => "أهلاً! 👋 أنا مساعد الموقع. اسألني عن خدماتنا أو الأسعار أو مدة تنفيذ المشاريع.",
    }
}

/// Suggestion chips shown under the greeting. Picking one sends its text.
pub fn quick_replies(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => &[
            "What are your prices?",
            "How long does a website take?",
            "I need an online store",
            "How can I contact you?",
        ],
        Locale::Ar => &[
            "ما هي أسعاركم؟",
            "كم مدة تنفيذ الموقع؟",
            "أحتاج متجر إلكتروني",
            "كيف أتواصل معكم؟",
        ],
    }
}

/// Reply used when the completion endpoint cannot answer.
///
/// Always carries exactly one WhatsApp action so the visitor has a manual
/// way forward.
pub fn ai_failure(locale: Locale) -> ReplyPayload {
    let (text, label, message) = match locale {
        Locale::En => (
            "Sorry, I couldn't answer that right now. Please try again in a moment, or message our team on WhatsApp.",
            "Message us on WhatsApp",
            "Hello, I had a question the site assistant couldn't answer.",
        ),
        Locale::Ar => (
            "عذراً، لم أتمكن من الإجابة الآن. حاول مرة أخرى بعد قليل، أو راسل فريقنا عبر واتساب.",
            "راسلنا عبر واتساب",
            "مرحباً، لدي سؤال لم يتمكن مساعد الموقع من الإجابة عليه.",
        ),
    };

    ReplyPayload {
        text: text.to_string(),
        actions: vec![Action::whatsapp(label, message)],
    }
}
