//! Player command tree
//!
//! `/<player base> [leaderboard|milestones|streaks|toggle reminder]`. Every
//! handler is user-only; the console gets the standard notice.

use crate::command::{Actor, CommandNode, Host};
use crate::config::{ModulePermissions, Modules};
use crate::votes::VoteContext;

/// Number of entries shown by the leaderboard
const LEADERBOARD_SIZE: usize = 10;

/// Build the player root command from the current configuration
pub fn player_command(ctx: &VoteContext) -> CommandNode {
    let (base, aliases, permission) = {
        let settings = ctx.settings.borrow();
        let root = &settings.config.commands.player;
        (root.base.clone(), root.aliases.clone(), root.permission.clone())
    };

    let handler_ctx = ctx.clone();
    let mut root = CommandNode::new(&base)
        .with_description("Vote command")
        .with_usage(format!("/{}", base))
        .with_aliases(aliases)
        .executes_user(move |user, args| {
            let today = handler_ctx.today();
            let record = handler_ctx.state.borrow().store.record_on(user.name(), today);
            handler_ctx.send(
                args.host(),
                &Actor::from(user.clone()),
                "VOTE_LIST",
                &[
                    "daily_votes",
                    &record.daily.to_string(),
                    "total_votes",
                    &record.total.to_string(),
                ],
            )
        })
        .with_subcommand(leaderboard_command(ctx))
        .with_subcommand(milestones_command(ctx))
        .with_subcommand(streaks_command(ctx))
        .with_subcommand(toggle_command(ctx));

    if let Some(permission) = permission {
        root = root.with_permission(permission);
    }
    root
}

fn leaderboard_command(ctx: &VoteContext) -> CommandNode {
    let ctx = ctx.clone();
    CommandNode::new("leaderboard").executes_user(move |user, args| {
        let host = args.host();
        let actor = Actor::from(user.clone());
        let top = ctx.state.borrow().store.leaderboard(LEADERBOARD_SIZE);

        if top.is_empty() {
            return ctx.send(host, &actor, "LEADERBOARD_EMPTY", &[]);
        }

        ctx.send(host, &actor, "LEADERBOARD_HEADER", &[])?;
        for (position, (name, votes)) in top.iter().enumerate() {
            ctx.send(
                host,
                &actor,
                "LEADERBOARD_ENTRY",
                &[
                    "position",
                    &(position + 1).to_string(),
                    "player",
                    name,
                    "votes",
                    &votes.to_string(),
                ],
            )?;
        }
        Ok(())
    })
}

/// Whether `module` is on; tells the user otherwise
fn require_module(
    ctx: &VoteContext,
    host: &dyn Host,
    actor: &Actor,
    module: fn(&Modules) -> bool,
) -> anyhow::Result<bool> {
    if ctx.module_enabled(module) {
        return Ok(true);
    }
    ctx.send(host, actor, "MODULE_DISABLED", &[])?;
    Ok(false)
}

/// Whether `actor` holds the module permission picked by `permission`
///
/// Always true while module permissions are switched off.
fn require_module_permission(
    ctx: &VoteContext,
    host: &dyn Host,
    actor: &Actor,
    permission: fn(&ModulePermissions) -> String,
) -> anyhow::Result<bool> {
    let required = {
        let settings = ctx.settings.borrow();
        let permissions = &settings.config.modules.permissions;
        if !permissions.enabled {
            return Ok(true);
        }
        permission(permissions)
    };

    if host.has_permission(actor, &required) {
        return Ok(true);
    }
    ctx.send(host, actor, "NO_PERMISSION", &[])?;
    Ok(false)
}

fn milestones_command(ctx: &VoteContext) -> CommandNode {
    let ctx = ctx.clone();
    CommandNode::new("milestones")
        .with_completer(|_, _| Ok(Some(Vec::new())))
        .executes_user(move |user, args| {
            let host = args.host();
            let actor = Actor::from(user.clone());
            if !require_module(&ctx, host, &actor, |m| m.milestones)?
                || !require_module_permission(&ctx, host, &actor, |p| p.milestones.clone())?
            {
                return Ok(());
            }

            let total = ctx.state.borrow().store.record(user.name()).total;
            let milestones = ctx
                .settings
                .borrow()
                .config
                .milestones
                .iter()
                .map(|&goal| {
                    if total >= goal {
                        format!("&a{}", goal)
                    } else {
                        format!("&c{}", goal)
                    }
                })
                .collect::<Vec<_>>()
                .join("&7, ");

            ctx.send(host, &actor, "MILESTONES", &["milestones", &milestones])
        })
}

fn streaks_command(ctx: &VoteContext) -> CommandNode {
    let ctx = ctx.clone();
    CommandNode::new("streaks")
        .with_completer(|_, _| Ok(Some(Vec::new())))
        .executes_user(move |user, args| {
            let host = args.host();
            let actor = Actor::from(user.clone());
            if !require_module(&ctx, host, &actor, |m| m.streaks_menu)?
                || !require_module_permission(&ctx, host, &actor, |p| p.streaks.clone())?
            {
                return Ok(());
            }

            let today = ctx.today();
            let streak = ctx.state.borrow().store.record_on(user.name(), today).streak;
            ctx.send(host, &actor, "STREAK_INFO", &["streak", &streak.to_string()])
        })
}

fn toggle_command(ctx: &VoteContext) -> CommandNode {
    CommandNode::new("toggle").with_subcommand(reminder_toggle_command(ctx))
}

fn reminder_toggle_command(ctx: &VoteContext) -> CommandNode {
    let ctx = ctx.clone();
    CommandNode::new("reminder").executes_user(move |user, args| {
        let host = args.host();
        let actor = Actor::from(user.clone());
        if !require_module(&ctx, host, &actor, |m| m.vote_reminder)? {
            return Ok(());
        }

        let enabled = ctx.state.borrow_mut().store.toggle_reminders(user.name());
        let status = if enabled { "enabled" } else { "disabled" };
        ctx.send(host, &actor, "VOTE_REMINDER_TOGGLE", &["status", status])
    })
}
