//! Section templates dropped onto the canvas as a bulk insert.

use crate::component::{ComponentNode, ComponentType, Forest};
use crate::id_generator::IdGenerator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Hero,
    Features,
    Contact,
    Pricing,
    Footer,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::Hero,
        Template::Features,
        Template::Contact,
        Template::Pricing,
        Template::Footer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Template::Hero => "hero",
            Template::Features => "features",
            Template::Contact => "contact",
            Template::Pricing => "pricing",
            Template::Footer => "footer",
        }
    }

    /// Build the template's nodes with fresh ids
    pub fn instantiate(self, ids: &mut IdGenerator) -> Forest {
        let mut node = |kind: ComponentType| ComponentNode::new(ids.new_id(), kind);

        match self {
            Template::Hero => {
                let section = node(ComponentType::Container)
                    .with_style("padding", "80px 20px")
                    .with_style("textAlign", "center");
                let heading = node(ComponentType::Heading).with_content("Welcome to Our Website");
                let text = node(ComponentType::Text)
                    .with_content("Build something people will remember.");
                let button = node(ComponentType::Button).with_content("Get Started");
                vec![section.with_child(heading).with_child(text).with_child(button)]
            }

            Template::Features => {
                let mut section = node(ComponentType::Container).with_style("display", "flex");
                for title in ["Fast", "Secure", "Flexible"] {
                    let card = node(ComponentType::Card)
                        .with_child(node(ComponentType::Heading).with_content(title))
                        .with_child(node(ComponentType::Text));
                    section = section.with_child(card);
                }
                vec![section]
            }

            Template::Contact => {
                let heading = node(ComponentType::Heading).with_content("Contact Us");
                let form = node(ComponentType::Form)
                    .with_child(node(ComponentType::Input).with_content("Name"))
                    .with_child(node(ComponentType::Input).with_content("Email"))
                    .with_child(node(ComponentType::Button).with_content("Send"));
                vec![heading, form]
            }

            Template::Pricing => {
                let mut section = node(ComponentType::Container).with_style("display", "flex");
                for (plan, price) in [("Basic", "$9/mo"), ("Pro", "$29/mo")] {
                    let tier = node(ComponentType::Pricing)
                        .with_child(node(ComponentType::Heading).with_content(plan))
                        .with_child(node(ComponentType::Text).with_content(price))
                        .with_child(node(ComponentType::Button).with_content("Choose"));
                    section = section.with_child(tier);
                }
                vec![section]
            }

            Template::Footer => {
                let footer = node(ComponentType::Footer)
                    .with_child(node(ComponentType::Divider))
                    .with_child(node(ComponentType::Text).with_content("© All rights reserved."));
                vec![footer]
            }
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown template: {0}")]
pub struct UnknownTemplate(pub String);

impl FromStr for Template {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::{all_ids, count};
    use std::collections::HashSet;

    #[test]
    fn test_templates_have_unique_ids() {
        let mut ids = IdGenerator::from_seed("tpl");
        let mut seen = HashSet::new();

        for template in Template::ALL {
            let forest = template.instantiate(&mut ids);
            assert!(!forest.is_empty(), "{} is empty", template);
            for id in all_ids(&forest) {
                assert!(seen.insert(id), "{} reused an id", template);
            }
        }
    }

    #[test]
    fn test_only_containers_have_children() {
        fn check(forest: &[ComponentNode]) {
            for node in forest {
                if !node.kind.is_container() {
                    assert!(node.children.is_empty(), "{} has children", node.kind);
                }
                check(&node.children);
            }
        }

        let mut ids = IdGenerator::from_seed("tpl");
        for template in Template::ALL {
            check(&template.instantiate(&mut ids));
        }
    }

    #[test]
    fn test_hero_shape() {
        let mut ids = IdGenerator::from_seed("tpl");
        let hero = Template::Hero.instantiate(&mut ids);

        assert_eq!(hero.len(), 1);
        assert_eq!(count(&hero), 4);
        assert_eq!(hero[0].children[2].content.as_deref(), Some("Get Started"));
    }
}
