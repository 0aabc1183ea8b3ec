use super::click_target::ClickTarget;

/// 用户触发的点击事件。
///
/// 分发器接手后会调用 [`prevent_default`](Self::prevent_default) 与
/// [`stop_propagation`](Self::stop_propagation)，宿主据此不再执行默认导航或向外冒泡。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerEvent {
    pub target: ClickTarget,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl TriggerEvent {
    pub fn new(target: ClickTarget) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
