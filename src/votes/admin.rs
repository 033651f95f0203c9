//! Administrator command tree
//!
//! `/<admin base> [reload|givevote|testvote|removevote|voteparty|streaks]`.
//! The whole tree sits behind the admin permission.

use crate::command::{Actor, Arguments, CommandNode, Host};
use crate::votes::{user_completer, PartyEvent, VoteContext};
use tracing::info;

const PLAYER_NOT_FOUND: &str = "&cPlayer not found!";

/// Build the admin root command from the current configuration
pub fn admin_command(ctx: &VoteContext) -> CommandNode {
    let (base, aliases, permission) = {
        let settings = ctx.settings.borrow();
        let root = &settings.config.commands.admin;
        (
            root.base.clone(),
            root.aliases.clone(),
            settings.config.admin_permission().to_string(),
        )
    };

    let help_ctx = ctx.clone();
    let label = base.clone();

    CommandNode::new(&base)
        .with_description("PhantomVoting admin command")
        .with_usage(format!("/{}", base))
        .with_aliases(aliases)
        .with_permission(permission)
        .executes(move |actor, args| {
            help_ctx.send(args.host(), actor, "ADMIN_HELP", &["admin_command", &label])
        })
        .with_subcommand(reload_command(ctx))
        .with_subcommand(give_vote_command(ctx, &base))
        .with_subcommand(test_vote_command(ctx, &base))
        .with_subcommand(remove_vote_command(ctx, &base))
        .with_subcommand(vote_party_command(ctx, &base))
        .with_subcommand(streaks_command(ctx, &base))
}

fn reload_command(ctx: &VoteContext) -> CommandNode {
    let ctx = ctx.clone();
    CommandNode::new("reload").executes(move |actor, args| {
        ctx.reload()?;
        ctx.send(args.host(), actor, "RELOAD", &[])
    })
}

/// Resolve the `<player> <amount>` pair shared by givevote and removevote
///
/// Sends the matching error message and returns `None` when either is unusable.
fn target_and_amount(actor: &Actor, args: &Arguments<'_>, usage: &str) -> Option<(String, u32)> {
    let host = args.host();
    if args.len() < 2 {
        host.send_message(actor, usage);
        return None;
    }

    let Some(target) = args.user(0) else {
        host.send_message(actor, PLAYER_NOT_FOUND);
        return None;
    };

    match args.int(1) {
        Some(amount) if amount > 0 => Some((target.name().to_string(), amount.unsigned_abs())),
        _ => {
            host.send_message(actor, "&cAmount must be a positive number!");
            None
        }
    }
}

fn give_vote_command(ctx: &VoteContext, base: &str) -> CommandNode {
    let usage = format!("&cUsage: /{} givevote <player> <amount>", base);
    let handler_ctx = ctx.clone();

    CommandNode::new("givevote")
        .with_completer(user_completer(ctx))
        .executes(move |actor, args| {
            let Some((target, amount)) = target_and_amount(actor, args, &usage) else {
                return Ok(());
            };
            let today = handler_ctx.today();
            handler_ctx.state.borrow_mut().store.add_votes(&target, amount, today);
            handler_ctx.send(
                args.host(),
                actor,
                "GIVE_VOTE",
                &["player", &target, "amount", &amount.to_string()],
            )
        })
}

fn remove_vote_command(ctx: &VoteContext, base: &str) -> CommandNode {
    let usage = format!("&cUsage: /{} removevote <player> <amount>", base);
    let handler_ctx = ctx.clone();

    CommandNode::new("removevote")
        .with_completer(user_completer(ctx))
        .executes(move |actor, args| {
            let Some((target, amount)) = target_and_amount(actor, args, &usage) else {
                return Ok(());
            };
            let today = handler_ctx.today();
            handler_ctx.state.borrow_mut().store.remove_votes(&target, amount, today);
            handler_ctx.send(
                args.host(),
                actor,
                "REMOVE_VOTE",
                &["player", &target, "amount", &amount.to_string()],
            )
        })
}

fn test_vote_command(ctx: &VoteContext, base: &str) -> CommandNode {
    let usage = format!("&cUsage: /{} testvote <player>", base);
    let handler_ctx = ctx.clone();

    CommandNode::new("testvote")
        .with_completer(user_completer(ctx))
        .executes(move |actor, args| {
            let host = args.host();
            if args.is_empty() {
                host.send_message(actor, &usage);
                return Ok(());
            }
            let Some(target) = args.user(0) else {
                host.send_message(actor, PLAYER_NOT_FOUND);
                return Ok(());
            };

            let today = handler_ctx.today();
            let (total, event) = {
                let mut state = handler_ctx.state.borrow_mut();
                let total = state.store.record_vote(target.name(), today).total;
                (total, state.party.add(1))
            };

            let name = target.name().to_string();
            handler_ctx.send(
                host,
                &Actor::from(target),
                "VOTE_RECEIVED",
                &["player", &name, "total", &total.to_string()],
            )?;
            handler_ctx.send(host, actor, "TEST_VOTE", &["player", &name])?;
            announce_party(&handler_ctx, host, actor, event)
        })
}

/// Tell everyone about a started party; report plain progress to `actor` only
fn announce_party(
    ctx: &VoteContext,
    host: &dyn Host,
    actor: &Actor,
    event: PartyEvent,
) -> anyhow::Result<()> {
    match event {
        PartyEvent::Started { required } => {
            let parties = ctx.state.borrow().party.parties();
            info!(parties, required, "vote party started");
            ctx.broadcast(host, "VOTE_PARTY_START", &["required", &required.to_string()])
        }
        PartyEvent::Progress { current, required } => ctx.send(
            host,
            actor,
            "VOTE_PARTY_PROGRESS",
            &["current", &current.to_string(), "required", &required.to_string()],
        ),
    }
}

fn vote_party_command(ctx: &VoteContext, base: &str) -> CommandNode {
    CommandNode::new("voteparty")
        .with_subcommand(vote_party_force_start_command(ctx))
        .with_subcommand(vote_party_add_command(ctx, base))
        .with_subcommand(vote_party_set_command(ctx, base))
}

fn vote_party_force_start_command(ctx: &VoteContext) -> CommandNode {
    let ctx = ctx.clone();
    CommandNode::new("forcestart")
        .with_completer(|_, args| match args {
            [partial] => {
                let partial = partial.to_lowercase();
                Ok(Some(
                    ["true", "false"]
                        .into_iter()
                        .filter(|option| option.starts_with(&partial))
                        .map(str::to_string)
                        .collect(),
                ))
            }
            _ => Ok(Some(Vec::new())),
        })
        .executes(move |actor, args| {
            let reset_progress = args.boolean(0).unwrap_or(false);
            let event = ctx.state.borrow_mut().party.force_start(reset_progress);
            announce_party(&ctx, args.host(), actor, event)
        })
}

/// Parse the `<amount>` of voteparty add/set, sending usage or error messages
fn party_amount(actor: &Actor, args: &Arguments<'_>, usage: &str) -> Option<i64> {
    let host = args.host();
    if args.is_empty() {
        host.send_message(actor, usage);
        return None;
    }
    let amount = args.int(0);
    if amount.is_none() {
        host.send_message(actor, "&cAmount must be a number!");
    }
    amount.map(i64::from)
}

fn vote_party_add_command(ctx: &VoteContext, base: &str) -> CommandNode {
    let usage = format!("&cUsage: /{} voteparty add <amount>", base);
    let ctx = ctx.clone();

    CommandNode::new("add").executes(move |actor, args| {
        let Some(amount) = party_amount(actor, args, &usage) else {
            return Ok(());
        };
        let event = ctx.state.borrow_mut().party.add(amount);
        announce_party(&ctx, args.host(), actor, event)
    })
}

fn vote_party_set_command(ctx: &VoteContext, base: &str) -> CommandNode {
    let usage = format!("&cUsage: /{} voteparty set <amount>", base);
    let ctx = ctx.clone();

    CommandNode::new("set").executes(move |actor, args| {
        let Some(amount) = party_amount(actor, args, &usage) else {
            return Ok(());
        };
        let event = ctx.state.borrow_mut().party.set(amount);
        match event {
            PartyEvent::Progress { current, required } => ctx.send(
                args.host(),
                actor,
                "VOTE_PARTY_SET",
                &["current", &current.to_string(), "required", &required.to_string()],
            ),
            started => announce_party(&ctx, args.host(), actor, started),
        }
    })
}

fn streaks_command(ctx: &VoteContext, base: &str) -> CommandNode {
    CommandNode::new("streaks")
        .with_subcommand(streaks_reset_command(ctx, base))
        .with_subcommand(streaks_set_command(ctx, base))
        .with_subcommand(streaks_add_command(ctx, base))
}

fn streaks_reset_command(ctx: &VoteContext, base: &str) -> CommandNode {
    let usage = format!("&cUsage: /{} streaks reset <player>", base);
    let handler_ctx = ctx.clone();

    CommandNode::new("reset")
        .with_completer(user_completer(ctx))
        .executes(move |actor, args| {
            let host = args.host();
            if args.is_empty() {
                host.send_message(actor, &usage);
                return Ok(());
            }
            let Some(target) = args.user(0) else {
                host.send_message(actor, PLAYER_NOT_FOUND);
                return Ok(());
            };

            handler_ctx.state.borrow_mut().store.reset_streak(target.name());
            handler_ctx.send(host, actor, "STREAK_RESET", &["player", target.name()])
        })
}

/// Resolve `<player> <streak>` for streaks set/add
fn target_and_streak(actor: &Actor, args: &Arguments<'_>, usage: &str) -> Option<(String, i32)> {
    let host = args.host();
    if args.len() < 2 {
        host.send_message(actor, usage);
        return None;
    }

    let Some(target) = args.user(0) else {
        host.send_message(actor, PLAYER_NOT_FOUND);
        return None;
    };

    match args.int(1) {
        Some(streak) => Some((target.name().to_string(), streak)),
        None => {
            host.send_message(actor, "&cStreak must be a number!");
            None
        }
    }
}

fn streaks_set_command(ctx: &VoteContext, base: &str) -> CommandNode {
    let usage = format!("&cUsage: /{} streaks set <player> <streak>", base);
    let handler_ctx = ctx.clone();

    CommandNode::new("set")
        .with_completer(user_completer(ctx))
        .executes(move |actor, args| {
            let Some((target, streak)) = target_and_streak(actor, args, &usage) else {
                return Ok(());
            };
            let Ok(streak) = u32::try_from(streak) else {
                args.host().send_message(actor, "&cStreak cannot be negative!");
                return Ok(());
            };

            let today = handler_ctx.today();
            handler_ctx.state.borrow_mut().store.set_streak(&target, streak, today);
            handler_ctx.send(
                args.host(),
                actor,
                "STREAK_SET",
                &["player", &target, "streak", &streak.to_string()],
            )
        })
}

fn streaks_add_command(ctx: &VoteContext, base: &str) -> CommandNode {
    let usage = format!("&cUsage: /{} streaks add <player> <streak>", base);
    let handler_ctx = ctx.clone();

    CommandNode::new("add")
        .with_completer(user_completer(ctx))
        .executes(move |actor, args| {
            let Some((target, streak)) = target_and_streak(actor, args, &usage) else {
                return Ok(());
            };

            let today = handler_ctx.today();
            handler_ctx.state.borrow_mut().store.add_streak(&target, streak, today);
            handler_ctx.send(
                args.host(),
                actor,
                "STREAK_ADD",
                &["player", &target, "streak", &streak.to_string()],
            )
        })
}
