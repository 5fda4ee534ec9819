use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use lazy_static::lazy_static;

use crate::core_ftpcommand::{
    allo, cdup, cwd, dele, eprt, epsv, feat, list, mdtm, mkd, mode, nlst, noop, opts, pass, pasv,
    port, pwd, quit, retr, rmd, rnfr, rnto, size, stor, stru, syst, type_, user,
};
use crate::session::Session;

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// A command handler borrows the session for the duration of one command;
/// dispatch is strictly serial so this is the only borrow alive.
pub type CommandHandler = for<'a> fn(&'a mut Session, &'a str) -> HandlerFuture<'a>;

/// One row of the command table: the two dispatch gates plus the handler.
pub struct CommandSpec {
    /// An empty parameter is refused with `553` before the handler runs.
    pub requires_param: bool,
    /// Unauthenticated sessions are refused with `530` before the handler runs.
    pub requires_auth: bool,
    pub handler: CommandHandler,
}

impl CommandSpec {
    fn new(requires_param: bool, requires_auth: bool, handler: CommandHandler) -> Self {
        CommandSpec {
            requires_param,
            requires_auth,
            handler,
        }
    }
}

lazy_static! {
    /// The command table, keyed by the uppercased command token. Immutable
    /// and shared by every session.
    pub static ref COMMANDS: HashMap<&'static str, CommandSpec> = initialize_command_handlers();
}

pub fn initialize_command_handlers() -> HashMap<&'static str, CommandSpec> {
    let mut handlers: HashMap<&'static str, CommandSpec> = HashMap::new();

    handlers.insert("ALLO", CommandSpec::new(false, false, exec_allo));
    handlers.insert("CDUP", CommandSpec::new(false, true, exec_cdup));
    handlers.insert("CWD", CommandSpec::new(true, true, exec_cwd));
    handlers.insert("DELE", CommandSpec::new(true, true, exec_dele));
    handlers.insert("EPRT", CommandSpec::new(true, true, exec_eprt));
    handlers.insert("EPSV", CommandSpec::new(false, true, exec_epsv));
    handlers.insert("FEAT", CommandSpec::new(false, false, exec_feat));
    handlers.insert("LIST", CommandSpec::new(false, true, exec_list));
    handlers.insert("NLST", CommandSpec::new(false, true, exec_nlst));
    handlers.insert("MDTM", CommandSpec::new(true, true, exec_mdtm));
    handlers.insert("MKD", CommandSpec::new(true, true, exec_mkd));
    handlers.insert("MODE", CommandSpec::new(true, true, exec_mode));
    handlers.insert("NOOP", CommandSpec::new(false, false, exec_noop));
    handlers.insert("OPTS", CommandSpec::new(false, true, exec_opts));
    handlers.insert("PASS", CommandSpec::new(true, false, exec_pass));
    handlers.insert("PASV", CommandSpec::new(false, true, exec_pasv));
    handlers.insert("PORT", CommandSpec::new(true, true, exec_port));
    handlers.insert("PWD", CommandSpec::new(false, true, exec_pwd));
    handlers.insert("QUIT", CommandSpec::new(false, false, exec_quit));
    handlers.insert("RETR", CommandSpec::new(true, true, exec_retr));
    handlers.insert("RNFR", CommandSpec::new(true, true, exec_rnfr));
    handlers.insert("RNTO", CommandSpec::new(true, true, exec_rnto));
    handlers.insert("RMD", CommandSpec::new(true, true, exec_rmd));
    handlers.insert("SIZE", CommandSpec::new(true, true, exec_size));
    handlers.insert("STOR", CommandSpec::new(true, true, exec_stor));
    handlers.insert("STRU", CommandSpec::new(true, true, exec_stru));
    handlers.insert("SYST", CommandSpec::new(false, true, exec_syst));
    handlers.insert("TYPE", CommandSpec::new(false, true, exec_type));
    handlers.insert("USER", CommandSpec::new(true, false, exec_user));

    // RFC 775 aliases, dispatched to the same handlers.
    handlers.insert("XCUP", CommandSpec::new(false, true, exec_cdup));
    handlers.insert("XCWD", CommandSpec::new(true, true, exec_cwd));
    handlers.insert("XPWD", CommandSpec::new(false, true, exec_pwd));
    handlers.insert("XRMD", CommandSpec::new(true, true, exec_rmd));

    handlers
}

fn exec_allo<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(allo::handle_allo_command(session, arg))
}

fn exec_cdup<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(cdup::handle_cdup_command(session, arg))
}

fn exec_cwd<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(cwd::handle_cwd_command(session, arg))
}

fn exec_dele<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(dele::handle_dele_command(session, arg))
}

fn exec_eprt<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(eprt::handle_eprt_command(session, arg))
}

fn exec_epsv<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(epsv::handle_epsv_command(session, arg))
}

fn exec_feat<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(feat::handle_feat_command(session, arg))
}

fn exec_list<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(list::handle_list_command(session, arg))
}

fn exec_nlst<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(nlst::handle_nlst_command(session, arg))
}

fn exec_mdtm<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(mdtm::handle_mdtm_command(session, arg))
}

fn exec_mkd<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(mkd::handle_mkd_command(session, arg))
}

fn exec_mode<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(mode::handle_mode_command(session, arg))
}

fn exec_noop<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(noop::handle_noop_command(session, arg))
}

fn exec_opts<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(opts::handle_opts_command(session, arg))
}

fn exec_pass<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(pass::handle_pass_command(session, arg))
}

fn exec_pasv<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(pasv::handle_pasv_command(session, arg))
}

fn exec_port<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(port::handle_port_command(session, arg))
}

fn exec_pwd<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(pwd::handle_pwd_command(session, arg))
}

fn exec_quit<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(quit::handle_quit_command(session, arg))
}

fn exec_retr<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(retr::handle_retr_command(session, arg))
}

fn exec_rnfr<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(rnfr::handle_rnfr_command(session, arg))
}

fn exec_rnto<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(rnto::handle_rnto_command(session, arg))
}

fn exec_rmd<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(rmd::handle_rmd_command(session, arg))
}

fn exec_size<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(size::handle_size_command(session, arg))
}

fn exec_stor<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(stor::handle_stor_command(session, arg))
}

fn exec_stru<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(stru::handle_stru_command(session, arg))
}

fn exec_syst<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(syst::handle_syst_command(session, arg))
}

fn exec_type<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(type_::handle_type_command(session, arg))
}

fn exec_user<'a>(session: &'a mut Session, arg: &'a str) -> HandlerFuture<'a> {
    Box::pin(user::handle_user_command(session, arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TOKENS: [&str; 33] = [
        "ALLO", "CDUP", "CWD", "DELE", "EPRT", "EPSV", "FEAT", "LIST", "NLST", "MDTM", "MKD",
        "MODE", "NOOP", "OPTS", "PASS", "PASV", "PORT", "PWD", "QUIT", "RETR", "RNFR", "RNTO",
        "RMD", "SIZE", "STOR", "STRU", "SYST", "TYPE", "USER", "XCUP", "XCWD", "XPWD", "XRMD",
    ];

    #[test]
    fn table_covers_every_supported_token() {
        assert_eq!(COMMANDS.len(), ALL_TOKENS.len());
        for token in ALL_TOKENS {
            assert!(COMMANDS.contains_key(token), "missing command {}", token);
        }
    }

    #[test]
    fn auth_flags_match_the_protocol() {
        for token in ALL_TOKENS {
            let auth_free = matches!(token, "ALLO" | "FEAT" | "NOOP" | "PASS" | "QUIT" | "USER");
            assert_eq!(
                COMMANDS[token].requires_auth, !auth_free,
                "auth flag for {}",
                token
            );
        }
    }

    #[test]
    fn param_flags_match_the_protocol() {
        for token in ALL_TOKENS {
            let needs_param = matches!(
                token,
                "CWD" | "DELE"
                    | "EPRT"
                    | "MDTM"
                    | "MKD"
                    | "MODE"
                    | "PASS"
                    | "PORT"
                    | "RETR"
                    | "RNFR"
                    | "RNTO"
                    | "RMD"
                    | "SIZE"
                    | "STOR"
                    | "STRU"
                    | "USER"
                    | "XCWD"
                    | "XRMD"
            );
            assert_eq!(
                COMMANDS[token].requires_param, needs_param,
                "param flag for {}",
                token
            );
        }
    }

    #[test]
    fn aliases_carry_the_same_gates_as_their_canonical_commands() {
        for (alias, canonical) in [
            ("XCUP", "CDUP"),
            ("XCWD", "CWD"),
            ("XPWD", "PWD"),
            ("XRMD", "RMD"),
        ] {
            assert_eq!(
                COMMANDS[alias].requires_param,
                COMMANDS[canonical].requires_param
            );
            assert_eq!(
                COMMANDS[alias].requires_auth,
                COMMANDS[canonical].requires_auth
            );
        }
    }

    #[test]
    fn unknown_tokens_miss_the_table() {
        assert!(!COMMANDS.contains_key("REST"));
        assert!(!COMMANDS.contains_key("ACCT"));
        assert!(!COMMANDS.contains_key("FOO"));
    }
}
