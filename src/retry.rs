macro_rules! retry_fetch_operation {
    ($context:expr, $operation:expr) => {{
        const MAX_ATTEMPTS: u32 = 2;
        const RETRY_DELAY_MILLIS: u64 = 750;

        let context_value: String = $context.into();
        let mut attempt = 1;

        loop {
            match ($operation).await {
                Ok(value) => break Ok(value),
                Err(err) if attempt >= MAX_ATTEMPTS => break Err(err),
                Err(err) => {
                    log::warn!(
                        "Attempt {}/{} for {} failed: {}. Retrying in {}ms.",
                        attempt,
                        MAX_ATTEMPTS,
                        context_value,
                        err,
                        RETRY_DELAY_MILLIS
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(RETRY_DELAY_MILLIS)).await;
                    attempt += 1;
                }
            }
        }
    }};
}

pub(crate) use retry_fetch_operation;
