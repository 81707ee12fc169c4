use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::Tool;
use crate::Catalog;
use crate::matcher::find_one_with_tier;

/// Looks a building up in the local catalog on the model's behalf.
pub struct FindBuildingTool {
    catalog: Catalog,
}

impl FindBuildingTool {
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for FindBuildingTool {
    fn name(&self) -> &'static str {
        "find_building"
    }

    fn description(&self) -> &'static str {
        "Find a campus building by code, English/Korean name, or nickname."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Building code, English name, Korean name, or abbreviation extracted from the user's request."
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("find_building requires a string 'query' argument"))?;

        let Some((record, tier)) = find_one_with_tier(query, &self.catalog) else {
            info!("find_building({query}): no match");
            return Ok(json!({ "found": false }).to_string());
        };

        info!("find_building({query}): matched {} by {}", record.code, tier.as_str());
        Ok(json!({
            "found": true,
            "code": record.code,
            "name_kr": record.name_kr,
            "name_en": record.name_en,
            "map_link": record.map_link,
        })
        .to_string())
    }
}
