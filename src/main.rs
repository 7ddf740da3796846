use anyhow::Result;
use pdf_question_answer::orchestrator::App;
use pdf_question_answer::utils::logging;
use pdf_question_answer::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置（默认值 -> config.toml -> 环境变量）
    let config = Config::load()?;

    // 命令行参数：可选的 PDF 路径 + 可选的单次问题
    let mut args = std::env::args().skip(1);
    let pdf_path = args.next();
    let question = args.next();

    // 初始化并运行应用
    let mut app = App::initialize(config, pdf_path.as_deref()).await?;
    match question {
        // 带问题参数：单次问答后退出
        Some(question) => app.run_once(&question).await?,
        // 否则进入交互式会话
        None => app.run().await?,
    }

    Ok(())
}
