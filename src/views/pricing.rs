use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Plan {
    name: &'static str,
    price: &'static str,
    features: &'static [&'static str],
    highlighted: bool,
}

const PLANS: [Plan; 3] = [
    Plan {
        name: "Free",
        price: "0",
        features: &["10 сообщений/день", "Базовая модель"],
        highlighted: false,
    },
    Plan {
        name: "Pro",
        price: "990",
        features: &["Безлимит", "Все модели", "API доступ"],
        highlighted: true,
    },
    Plan {
        name: "Team",
        price: "2990",
        features: &["Всё из Pro", "Командная работа", "Приоритет"],
        highlighted: false,
    },
];

#[component]
pub fn PricingView() -> Element {
    rsx! {
        div { class: "panel",
            div { class: "panel-inner",
                h3 { class: "panel-title centered", "Тарифы" }
                p { class: "text-muted centered", "Выберите подходящий план для ваших задач" }
                div { class: "plan-grid",
                    for plan in PLANS {
                        PlanCard { key: "{plan.name}", plan }
                    }
                }
            }
        }
    }
}

#[component]
fn PlanCard(plan: Plan) -> Element {
    let (card_class, button_class) = if plan.highlighted {
        ("card plan highlighted", "btn btn-gradient btn-block")
    } else {
        ("card plan", "btn btn-outline btn-block")
    };
    rsx! {
        div { class: card_class,
            h4 { class: "plan-name", "{plan.name}" }
            p { class: "plan-price",
                "{plan.price} ₽"
                span { class: "text-muted", "/мес" }
            }
            ul { class: "plan-features",
                for feature in plan.features {
                    li { key: "{feature}", "✓ {feature}" }
                }
            }
            button { class: button_class, r#type: "button", "Выбрать" }
        }
    }
}
