use crate::scoring::{Dimension, ItemId, QuestionnaireItem};
use crate::Instrument;

/// AQ-10: Autism Spectrum Quotient, 10-item short form.
/// 10 binary items (agree = 1), five social and five attention. Total 0–10.
pub struct Aq10;

impl Instrument for Aq10 {
    fn id(&self) -> &str {
        "aq10"
    }

    fn name(&self) -> &str {
        "AQ-10"
    }

    fn items(&self) -> &[QuestionnaireItem] {
        static ITEMS: std::sync::LazyLock<Vec<QuestionnaireItem>> =
            std::sync::LazyLock::new(|| {
                use Dimension::{Attention, Social};

                let items = [
                    (
                        ItemId::A1,
                        "I often notice small sounds when others do not",
                        Attention,
                        false,
                    ),
                    (
                        ItemId::A2,
                        "I usually concentrate more on the whole picture, rather than the small details",
                        Attention,
                        true,
                    ),
                    (
                        ItemId::A3,
                        "I find it easy to do more than one thing at once",
                        Attention,
                        true,
                    ),
                    (
                        ItemId::A4,
                        "If there is an interruption, I can switch back to what I was doing very quickly",
                        Attention,
                        true,
                    ),
                    (
                        ItemId::A5,
                        "I find it easy to 'read between the lines' when someone is talking to me",
                        Social,
                        true,
                    ),
                    (
                        ItemId::A6,
                        "I know how to tell if someone listening to me is getting bored",
                        Social,
                        true,
                    ),
                    (
                        ItemId::A7,
                        "When I'm reading a story, I find it difficult to work out the characters' intentions",
                        Social,
                        false,
                    ),
                    (
                        ItemId::A8,
                        "I like to collect information about categories of things",
                        Attention,
                        false,
                    ),
                    (
                        ItemId::A9,
                        "I find it easy to work out what someone is thinking or feeling just by looking at their face",
                        Social,
                        true,
                    ),
                    (
                        ItemId::A10,
                        "I find it difficult to work out people's intentions",
                        Social,
                        false,
                    ),
                ];

                items
                    .into_iter()
                    .map(|(id, text, dimension, reversed)| QuestionnaireItem {
                        id,
                        text: text.to_string(),
                        dimension,
                        reversed,
                    })
                    .collect()
            });
        &ITEMS
    }
}
