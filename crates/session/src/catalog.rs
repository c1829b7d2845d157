//! Static marketing content rendered by the non-chat sections.

/// Sidebar entry in the demo chat history; display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatSummary {
    pub id: u64,
    pub title: &'static str,
    pub last_message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPlan {
    pub name: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
}

impl PricingPlan {
    /// Custom-priced plans have no monthly suffix.
    pub fn period_suffix(&self) -> Option<&'static str> {
        if self.price == CUSTOM_PRICE {
            None
        } else {
            Some("/месяц")
        }
    }
}

/// Glyph drawn in the badge next to a feature or contact card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Chat,
    Code,
    Pen,
    Languages,
    Book,
    Sparkles,
    Bolt,
    Mail,
    Phone,
    Pin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub glyph: Glyph,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactChannel {
    pub glyph: Glyph,
    pub title: &'static str,
    pub value: &'static str,
}

/// Heading pair shown at the top of a static section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeading {
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub const BRAND_NAME: &str = "GPT Chat";
pub const CUSTOM_PRICE: &str = "Custom";

pub const CHAT_HISTORY: &[ChatSummary] = &[
    ChatSummary {
        id: 1,
        title: "Новый чат",
        last_message: "Привет! Я GPT-ассистент...",
    },
    ChatSummary {
        id: 2,
        title: "Помощь с кодом",
        last_message: "Как создать React компонент?",
    },
    ChatSummary {
        id: 3,
        title: "Идеи для проекта",
        last_message: "Подскажи идеи стартапа",
    },
];

pub const PRICING_HEADING: SectionHeading = SectionHeading {
    title: "Тарифы и цены",
    subtitle: "Выберите план, который подходит вам",
};

pub const PRICING_PLANS: &[PricingPlan] = &[
    PricingPlan {
        name: "Free",
        price: "0₽",
        features: &[
            "10 запросов в день",
            "Базовая модель GPT",
            "История чатов",
            "Email поддержка",
        ],
        popular: false,
    },
    PricingPlan {
        name: "Pro",
        price: "999₽",
        features: &[
            "Безлимитные запросы",
            "GPT-4 Turbo",
            "Приоритетная поддержка",
            "API доступ",
            "Кастомные настройки",
        ],
        popular: true,
    },
    PricingPlan {
        name: "Enterprise",
        price: CUSTOM_PRICE,
        features: &[
            "Все из Pro",
            "Dedicated support",
            "SLA гарантии",
            "On-premise опция",
            "Обучение команды",
        ],
        popular: false,
    },
];

pub const FEATURES_HEADING: SectionHeading = SectionHeading {
    title: "Возможности",
    subtitle: "Мощный AI-ассистент для ваших задач",
};

pub const FEATURES: &[Feature] = &[
    Feature {
        glyph: Glyph::Chat,
        title: "Умный диалог",
        description: "Контекстное понимание разговора и запоминание предыдущих сообщений",
    },
    Feature {
        glyph: Glyph::Code,
        title: "Помощь с кодом",
        description: "Генерация, объяснение и отладка кода на любых языках программирования",
    },
    Feature {
        glyph: Glyph::Pen,
        title: "Креативное письмо",
        description: "Создание текстов, статей, сценариев и креативного контента",
    },
    Feature {
        glyph: Glyph::Languages,
        title: "Перевод",
        description: "Точный перевод текстов на более чем 50 языков мира",
    },
    Feature {
        glyph: Glyph::Book,
        title: "Обучение",
        description: "Объяснение сложных концепций простым языком с примерами",
    },
    Feature {
        glyph: Glyph::Sparkles,
        title: "Генерация идей",
        description: "Брейнштормы, креативные решения и нестандартные подходы",
    },
];

pub const FEATURE_HIGHLIGHT: Feature = Feature {
    glyph: Glyph::Bolt,
    title: "Молниеносные ответы",
    description: "Получайте ответы на ваши вопросы за секунды благодаря передовым технологиям AI",
};

pub const CONTACT_HEADING: SectionHeading = SectionHeading {
    title: "Контакты",
    subtitle: "Свяжитесь с нами по любым вопросам",
};

pub const CONTACT_CHANNELS: &[ContactChannel] = &[
    ContactChannel {
        glyph: Glyph::Mail,
        title: "Email",
        value: "hello@gptchat.com",
    },
    ContactChannel {
        glyph: Glyph::Phone,
        title: "Телефон",
        value: "+7 (999) 123-45-67",
    },
    ContactChannel {
        glyph: Glyph::Pin,
        title: "Адрес",
        value: "Москва, Россия",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_popular_plan() {
        let popular = PRICING_PLANS
            .iter()
            .filter(|plan| plan.popular)
            .map(|plan| plan.name)
            .collect::<Vec<_>>();

        assert_eq!(popular, vec!["Pro"]);
    }

    #[test]
    fn custom_price_has_no_period_suffix() {
        let suffixes = PRICING_PLANS
            .iter()
            .map(|plan| (plan.name, plan.period_suffix()))
            .collect::<Vec<_>>();

        assert_eq!(
            suffixes,
            vec![
                ("Free", Some("/месяц")),
                ("Pro", Some("/месяц")),
                ("Enterprise", None),
            ]
        );
    }

    #[test]
    fn chat_history_ids_are_unique() {
        let ids = CHAT_HISTORY
            .iter()
            .map(|chat| chat.id)
            .collect::<std::collections::BTreeSet<_>>();
        assert_eq!(ids.len(), CHAT_HISTORY.len());
    }
}
