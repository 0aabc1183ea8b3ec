/// 事件目标路径上的一个元素。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
    pub tag: String,
    pub classes: Vec<String>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// 点击目标：从被点击元素开始、向上直到卡片根元素的路径。
///
/// 第一个元素是目标本身。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    path: Vec<ElementNode>,
}

impl ClickTarget {
    pub fn new(path: Vec<ElementNode>) -> Self {
        Self { path }
    }

    /// 目标是否位于带 `class` 的元素之内（包括目标自身）。
    pub fn closest(&self, class: &str) -> Option<&ElementNode> {
        self.path.iter().find(|node| node.has_class(class))
    }

    pub fn is_within(&self, class: &str) -> bool {
        self.closest(class).is_some()
    }

    pub fn target(&self) -> Option<&ElementNode> {
        self.path.first()
    }
}
