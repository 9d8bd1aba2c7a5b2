/*!
 * 撤销/重做模块
 *
 * 基于状态快照而不是命令对象，换取实现上的简单。
 * 栈顶始终是当前状态，因此至少要有两个快照才能撤销。
 */

/// 单个状态快照
struct Snapshot<T> {
    description: String,
    state: T,
}

/// 快照式撤销管理器
pub struct UndoManager<T: Clone> {
    max_history: usize,
    undo_stack: Vec<Snapshot<T>>,
    redo_stack: Vec<Snapshot<T>>,
}

impl<T: Clone> UndoManager<T> {
    /// 默认保留的历史条数
    pub const DEFAULT_MAX_HISTORY: usize = 50;

    /// 创建使用默认历史上限的管理器
    pub fn new() -> Self {
        Self::with_max_history(Self::DEFAULT_MAX_HISTORY)
    }

    /// 创建指定历史上限的管理器
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            max_history,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// 保存一个状态快照
    ///
    /// 新动作会清空重做栈；超出上限时丢弃最旧的快照。
    pub fn save_state(&mut self, state: &T, description: impl Into<String>) {
        self.undo_stack.push(Snapshot {
            description: description.into(),
            state: state.clone(),
        });
        self.redo_stack.clear();

        while self.undo_stack.len() > self.max_history {
            self.undo_stack.remove(0);
        }
    }

    /// 撤销最近的动作，返回应恢复到的状态
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }

        let current = self.undo_stack.pop()?;
        self.redo_stack.push(current);

        self.undo_stack.last().map(|s| s.state.clone())
    }

    /// 重做最近撤销的动作，返回应恢复到的状态
    pub fn redo(&mut self) -> Option<T> {
        let snapshot = self.redo_stack.pop()?;
        let state = snapshot.state.clone();
        self.undo_stack.push(snapshot);
        Some(state)
    }

    /// 是否可以撤销（需要当前状态之外至少一个快照）
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// 是否可以重做
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// 将被撤销的动作描述
    pub fn undo_description(&self) -> Option<&str> {
        if self.can_undo() {
            self.undo_stack.last().map(|s| s.description.as_str())
        } else {
            None
        }
    }

    /// 将被重做的动作描述
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|s| s.description.as_str())
    }

    /// 可撤销的步数
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len().saturating_sub(1)
    }

    /// 可重做的步数
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// 清空全部历史
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<T: Clone> Default for UndoManager<T> {
    fn default() -> Self {
        Self::new()
    }
}
