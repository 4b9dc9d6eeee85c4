//! Reply composition and delivery mapping.
//!
//! Builds the user-facing message text for every action and maps a composed
//! reply onto outbound units. Adapters without a dedicated image primitive
//! get the image reference appended to the text so it is never lost.

use blindbox_core::{Catalog, Category};
use blindbox_store::PoolManager;

/// A composed reply: the text body plus an optional image attachment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub image: Option<String>,
}

impl Reply {
    /// A plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    /// A text reply with an image attachment. Blank references count as no
    /// image.
    pub fn with_image(text: impl Into<String>, image: &str) -> Self {
        let image = image.trim();
        Self {
            text: text.into(),
            image: (!image.is_empty()).then(|| image.to_string()),
        }
    }

    /// Map this reply onto outbound units.
    ///
    /// With an image-capable sink the image goes out as its own unit ahead
    /// of the text, so the explanation is never dropped by adapters that
    /// only forward one kind. Without the capability the reference is
    /// folded into the text instead.
    pub fn into_units(self, image_capable: bool) -> Vec<ReplyUnit> {
        match self.image {
            Some(image) if image_capable => {
                vec![ReplyUnit::Image(image), ReplyUnit::Text(self.text)]
            }
            Some(image) => vec![ReplyUnit::Text(format!("{}\n图片：{}", self.text, image))],
            None => vec![ReplyUnit::Text(self.text)],
        }
    }
}

/// One outbound message unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyUnit {
    /// An image reference, delivered through the dedicated image primitive.
    Image(String),
    /// A plain text message.
    Text(String),
}

/// Fixed usage text for empty or unrecognized input.
pub fn help_text() -> String {
    [
        "明日方舟通行证盲盒指令：",
        "1) /方舟盲盒 列表",
        "2) /方舟盲盒 选择 <种类ID>",
        "3) /方舟盲盒 开 <序号>",
        "4) /方舟盲盒 状态 [种类ID]",
    ]
    .join("\n")
}

/// All categories with slot count and pool fill, in catalog order.
pub fn category_list_text(catalog: &Catalog, pools: &PoolManager) -> String {
    if catalog.is_empty() {
        return "当前没有可用的盲盒种类，请先配置 data/box_config.json".to_string();
    }

    let mut lines = vec!["可用盲盒种类：".to_string()];
    for (category_id, category) in catalog {
        lines.push(format!(
            "- {}: {}（格子数: {}，奖池: {}/{}）",
            category_id,
            category.name,
            category.slots,
            pools.remaining(category_id),
            category.total_items(),
        ));
    }
    lines.push("\n使用：/方舟盲盒 选择 <种类ID>".to_string());
    lines.join("\n")
}

/// Confirmation after selecting a category.
pub fn selection_text(category: &Category, remaining: usize) -> String {
    format!(
        "你已选择【{}】\n当前剩余奖品数：{}\n可选盲盒序号：1 ~ {}\n请发送指令：/方舟盲盒 开 <序号>",
        category.name, remaining, category.slots,
    )
}

/// The outcome of opening a box.
pub fn draw_result_text(
    box_number: u64,
    category: &Category,
    item_name: &str,
    remaining: usize,
    pool_reset: bool,
) -> String {
    let reset_tip = if pool_reset {
        "\n奖池已抽空，已自动重置。"
    } else {
        ""
    };
    format!(
        "你选择了第 {} 号盲盒，开启结果：\n所属种类：{}\n奖品名称：{}\n当前奖池剩余：{}{}",
        box_number, category.name, item_name, remaining, reset_tip,
    )
}

/// Pool fill status for one category.
pub fn pool_status_text(category: &Category, remaining: usize) -> String {
    format!(
        "【{}】奖池状态：{}/{}",
        category.name,
        remaining,
        category.total_items(),
    )
}
