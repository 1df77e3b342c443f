//! A small gateway: one command, one button, a text echo.

use anyhow::Result;
use tracing::info;

use courier::{Bot, GatewayConfig, InlineButton, ReplyMarkup, SendOptions, endpoint, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::load()?;
    logging::init(&config.logging);

    let bot = Bot::new(config.settings()).await?;

    let confirm = InlineButton::new("confirm", "Confirm").with_data("yes");

    bot.handle("/start", {
        let confirm = confirm.clone();
        move |ctx| {
            let markup = ReplyMarkup::new().row(vec![confirm.clone()]);
            async move {
                ctx.send_with("Press the button:", SendOptions::new().markup(markup))
                    .await?;
                Ok(())
            }
        }
    });

    bot.handle(&confirm, |ctx| async move {
        ctx.send(format!("confirmed: {}", ctx.data())).await?;
        Ok(())
    });

    bot.handle(endpoint::TEXT, |ctx| async move {
        ctx.reply(format!("you said: {}", ctx.text())).await?;
        Ok(())
    });

    {
        let bot = bot.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutting down");
                bot.stop().await;
            }
        });
    }

    bot.start().await;
    Ok(())
}
