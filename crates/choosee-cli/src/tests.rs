use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["choosee"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_login_with_password_flag() {
    let cli = Cli::try_parse_from([
        "choosee",
        "login",
        "--email",
        "ana@example.com",
        "--password",
        "hunter22",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Login { email, password }) => {
            assert_eq!(email, "ana@example.com");
            assert_eq!(password, "hunter22");
        }
        other => panic!("expected Login, got {other:?}"),
    }
}

#[test]
fn login_requires_email() {
    let result = Cli::try_parse_from(["choosee", "login", "--password", "hunter22"]);
    assert!(result.is_err(), "login without --email should be rejected");
}

#[test]
fn parses_register_command() {
    let cli = Cli::try_parse_from([
        "choosee",
        "register",
        "--username",
        "ana",
        "--email",
        "ana@example.com",
        "--password",
        "longenough",
        "--password-confirmation",
        "longenough",
    ])
    .expect("expected valid cli args");

    assert!(matches!(cli.command, Some(Commands::Register { .. })));
}

#[test]
fn parses_logout_and_whoami() {
    let cli = Cli::try_parse_from(["choosee", "logout"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Logout)));

    let cli = Cli::try_parse_from(["choosee", "whoami"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Whoami)));
}

#[test]
fn wizard_defaults_pick_first_result() {
    let cli = Cli::try_parse_from(["choosee", "wizard"]).unwrap();
    let Some(Commands::Wizard(args)) = cli.command else {
        panic!("expected Wizard");
    };
    assert_eq!(args.pick, 1);
    assert!(args.max_price.is_none());
    assert!(!args.reset);
}

#[test]
fn wizard_accepts_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "choosee", "wizard", "--food", "Greek", "--diet", "Vegan", "--lat", "-33.86", "--lng",
        "151.2", "--pin",
    ])
    .unwrap();
    let Some(Commands::Wizard(args)) = cli.command else {
        panic!("expected Wizard");
    };
    assert_eq!(args.lat, Some(-33.86));
    assert_eq!(args.lng, Some(151.2));
    assert!(args.pin);
    assert_eq!(args.food.as_deref(), Some("Greek"));
}

#[test]
fn wizard_lat_requires_lng() {
    let result = Cli::try_parse_from(["choosee", "wizard", "--lat", "10.3"]);
    assert!(result.is_err(), "--lat without --lng should be rejected");
}

#[test]
fn wizard_search_conflicts_with_coordinates() {
    let result = Cli::try_parse_from([
        "choosee", "wizard", "--search", "IT Park", "--lat", "10.3", "--lng", "123.9",
    ]);
    assert!(result.is_err(), "--search and --lat should conflict");
}

#[test]
fn wizard_here_conflicts_with_search() {
    let result = Cli::try_parse_from(["choosee", "wizard", "--here", "--search", "IT Park"]);
    assert!(result.is_err(), "--here and --search should conflict");
}

#[test]
fn parses_wizard_search_with_pick() {
    let cli = Cli::try_parse_from([
        "choosee",
        "wizard",
        "--food-custom",
        "lechon",
        "--search",
        "IT Park",
        "--pick",
        "2",
    ])
    .unwrap();
    let Some(Commands::Wizard(args)) = cli.command else {
        panic!("expected Wizard");
    };
    assert_eq!(args.search.as_deref(), Some("IT Park"));
    assert_eq!(args.pick, 2);
    assert_eq!(args.food_custom.as_deref(), Some("lechon"));
    assert!(args.food.is_none());
}

#[test]
fn parses_recommend_with_open() {
    let cli =
        Cli::try_parse_from(["choosee", "recommend", "--mobile", "--open", "Ippudo"]).unwrap();
    match cli.command {
        Some(Commands::Recommend { mobile, open }) => {
            assert!(mobile);
            assert_eq!(open.as_deref(), Some("Ippudo"));
        }
        other => panic!("expected Recommend, got {other:?}"),
    }
}

#[test]
fn recommend_defaults_to_desktop() {
    let cli = Cli::try_parse_from(["choosee", "recommend"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Recommend {
            mobile: false,
            open: None
        })
    ));
}

#[test]
fn parses_visited_subcommands() {
    let cli = Cli::try_parse_from(["choosee", "visited", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Visited {
            command: VisitedCommands::List
        })
    ));

    let cli = Cli::try_parse_from(["choosee", "visited", "toggle", "Ippudo"]).unwrap();
    match cli.command {
        Some(Commands::Visited {
            command: VisitedCommands::Toggle { name },
        }) => assert_eq!(name, "Ippudo"),
        other => panic!("expected visited toggle, got {other:?}"),
    }

    let cli = Cli::try_parse_from(["choosee", "visited", "check", "Ippudo"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Visited {
            command: VisitedCommands::Check { .. }
        })
    ));
}

#[test]
fn visited_toggle_requires_name() {
    assert!(Cli::try_parse_from(["choosee", "visited", "toggle"]).is_err());
}

#[test]
fn parses_suggestions_subcommands() {
    let cli = Cli::try_parse_from(["choosee", "suggestions", "save"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Suggestions {
            command: SuggestionsCommands::Save
        })
    ));

    let cli = Cli::try_parse_from(["choosee", "suggestions", "show", "3"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Suggestions {
            command: SuggestionsCommands::Show {
                index: 3,
                mobile: false
            }
        })
    ));
}

#[test]
fn parses_places_reverse_with_negative_lng() {
    let cli = Cli::try_parse_from([
        "choosee", "places", "reverse", "--lat", "40.7", "--lng", "-74.0",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Places {
            command: PlacesCommands::Reverse { lat, lng },
        }) => {
            assert!((lat - 40.7).abs() < f64::EPSILON);
            assert!((lng + 74.0).abs() < f64::EPSILON);
        }
        other => panic!("expected places reverse, got {other:?}"),
    }
}

#[test]
fn parses_places_search() {
    let cli = Cli::try_parse_from(["choosee", "places", "search", "IT Park Cebu"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Places {
            command: PlacesCommands::Search { .. }
        })
    ));
}
