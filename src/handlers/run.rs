//! One-shot handler: submit a source file, poll to completion, print the
//! result and exit.

use anyhow::{bail, Result};
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    judge::{watch, JudgeClient},
    languages::Language,
    printer,
};

pub async fn run(
    cfg: &Config,
    language: &'static Language,
    source: &str,
    stdin_text: &str,
) -> Result<()> {
    let client = JudgeClient::from_config(cfg)?;

    let token = match client.submit(language.id, source, stdin_text).await {
        Ok(token) => token,
        Err(err) => bail!("{}", printer::error_message(&err)),
    };

    // One-shot mode has no teardown path; the token only exists so the loop
    // shares the editor's cancellation contract.
    let cancel = CancellationToken::new();
    let mut poller = client;
    match watch(&mut poller, &token, cfg.poll_interval(), &cancel).await {
        Ok(Some(result)) => {
            printer::print_result(&result);
            if !result.status.is_accepted() {
                std::process::exit(1);
            }
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => bail!("{}", printer::error_message(&err)),
    }
}
