//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责会话调度和应用生命周期，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `session` - 问答会话
//! - 管理应用生命周期（初始化、运行、收尾）
//! - 持有当前加载的 Document
//! - 读取用户输入并分发会话命令
//! - 控制 Ctrl-C 取消语义
//! - 输出会话统计信息
//!
//! ## 层次关系
//!
//! ```text
//! session (处理一场会话)
//!     ↓
//! workflow::QaFlow (处理单个问题)
//!     ↓
//! services (能力层：extract / prompt / answer / transcript)
//!     ↓
//! infrastructure (基础设施：GenerativeBackend)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：session 只管会话，不碰提取和回答的细节
//! 2. **资源隔离**：只有编排层持有 Document 和问答记录
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod session;

// 重新导出主要类型
pub use session::App;
