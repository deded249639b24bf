//! The Ansible command sequence.
//!
//! Three commands run in order: role install, collection install, playbook
//! execution. A non-zero exit aborts the remaining sequence without raising;
//! already-completed steps are not rolled back.

use tracing::{debug, error};

use crate::config;
use crate::executor::{CommandExecutor, CommandSpec, format_command_args};
use crate::spec::Spec;

/// How a provisioning command sequence ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// All three commands succeeded.
    Completed,
    /// A command exited non-zero; the rest of the sequence was skipped.
    Aborted {
        /// The command that failed.
        command: String,
    },
}

/// Executes the Ansible provisioning workflow for a spec.
pub struct AnsibleRunner<'a> {
    spec: &'a Spec,
    env: Vec<(String, String)>,
    debug: bool,
}

impl<'a> AnsibleRunner<'a> {
    /// Creates a runner over `spec` with a composed environment map.
    pub fn new(spec: &'a Spec, env: Vec<(String, String)>, debug: bool) -> Self {
        Self { spec, env, debug }
    }

    /// Runs the three-command sequence through `executor`, stopping at the
    /// first non-zero exit.
    pub fn start(&self, executor: &dyn CommandExecutor) -> anyhow::Result<RunOutcome> {
        let steps = [
            (config::MSG_INSTALL_ROLES, self.galaxy_roles_command()),
            (config::MSG_INSTALL_COLLECTIONS, self.galaxy_collections_command()),
            (config::MSG_INVOKE_ANSIBLE, self.playbook_command()),
        ];

        for (banner, command) in steps {
            println!("{}", banner);
            let result = executor.execute(&command)?;
            if !result.success() {
                println!("{}", config::MSG_ANSIBLE_ERROR);
                println!(
                    "COMMAND: {} {}",
                    command.command,
                    format_command_args(&command.args)
                );
                error!("ansible command reported a non-zero exit");
                return Ok(RunOutcome::Aborted {
                    command: command.command,
                });
            }
        }

        debug!("ansible playbook has finished");
        Ok(RunOutcome::Completed)
    }

    fn galaxy_roles_command(&self) -> CommandSpec {
        debug!(
            "reading profile role requirements from: {}",
            self.spec.galaxy_requirements_file
        );
        self.command_spec(
            "ansible-galaxy",
            vec![
                "role".to_string(),
                "install".to_string(),
                "-r".to_string(),
                self.spec.galaxy_requirements_file.to_string(),
                "-p".to_string(),
                self.spec.roles_path[0].to_string(),
            ],
        )
    }

    fn galaxy_collections_command(&self) -> CommandSpec {
        debug!(
            "reading profile collection requirements from: {}",
            self.spec.galaxy_requirements_file
        );
        self.command_spec(
            "ansible-galaxy",
            vec![
                "collection".to_string(),
                "install".to_string(),
                "-r".to_string(),
                self.spec.galaxy_requirements_file.to_string(),
                "-p".to_string(),
                self.spec.collections_path[0].to_string(),
            ],
        )
    }

    fn playbook_command(&self) -> CommandSpec {
        let mut args = vec![
            self.spec.playbook.to_string(),
            "-i".to_string(),
            self.spec.inventory.to_string(),
            "-e".to_string(),
            format!(
                "ansible_become_password={{{{ lookup('env', '{}') }}}}",
                config::ENV_ANSIBLE_BECOME_PASSWORD
            ),
        ];
        if self.debug {
            args.push("-vvvv".to_string());
        }
        self.command_spec("ansible-playbook", args)
    }

    fn command_spec(&self, command: &str, args: Vec<String>) -> CommandSpec {
        CommandSpec::new(command, args)
            .with_cwd(self.spec.profile_data_path.clone())
            .with_envs(self.env.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;

    fn sample_spec() -> Spec {
        Spec::from_profile_root(Utf8Path::new("/workspace/repo-master")).unwrap()
    }

    #[test]
    fn galaxy_roles_command_targets_the_first_roles_path() {
        let spec = sample_spec();
        let runner = AnsibleRunner::new(&spec, vec![], false);
        let command = runner.galaxy_roles_command();

        assert_eq!(command.command, "ansible-galaxy");
        assert_eq!(
            command.args,
            vec![
                "role",
                "install",
                "-r",
                "/workspace/repo-master/profile/requirements.yml",
                "-p",
                "/workspace/repo-master/profile/roles",
            ]
        );
        assert_eq!(
            command.cwd.as_deref().map(|p| p.as_str()),
            Some("/workspace/repo-master/profile")
        );
    }

    #[test]
    fn playbook_command_carries_the_become_password_lookup() {
        let spec = sample_spec();
        let runner = AnsibleRunner::new(&spec, vec![], false);
        let command = runner.playbook_command();

        assert_eq!(command.command, "ansible-playbook");
        assert!(
            command
                .args
                .contains(&"ansible_become_password={{ lookup('env', 'ANSIBLE_BECOME_PASSWORD') }}".to_string())
        );
        assert!(!command.args.contains(&"-vvvv".to_string()));
    }

    #[test]
    fn playbook_command_is_verbose_in_debug_mode() {
        let spec = sample_spec();
        let runner = AnsibleRunner::new(&spec, vec![], true);
        let command = runner.playbook_command();
        assert_eq!(command.args.last().map(String::as_str), Some("-vvvv"));
    }

    #[test]
    fn commands_inherit_the_composed_environment() {
        let spec = sample_spec();
        let env = vec![("ANSIBLE_ROLES_PATH".to_string(), "/roles".to_string())];
        let runner = AnsibleRunner::new(&spec, env.clone(), false);
        assert_eq!(runner.galaxy_collections_command().env, env);
    }
}
