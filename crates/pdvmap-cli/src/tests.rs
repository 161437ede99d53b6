use pdvmap_locator::LocationInput;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pdvmap"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_health_command() {
    let cli = Cli::try_parse_from(["pdvmap", "health"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Health)));
}

#[test]
fn parses_products_featured() {
    let cli = Cli::try_parse_from(["pdvmap", "products", "featured"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            command: ProductsCommands::Featured
        })
    ));
}

#[test]
fn parses_products_search_term() {
    let cli = Cli::try_parse_from(["pdvmap", "products", "search", "leite"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            command: ProductsCommands::Search { ref term }
        }) if term == "leite"
    ));
}

#[test]
fn locate_by_cep_builds_postal_code_input() {
    let cli = Cli::try_parse_from(["pdvmap", "locate", "--cep", "01001-000"]).unwrap();
    let Some(Commands::Locate { location }) = cli.command else {
        panic!("expected locate command");
    };
    assert_eq!(
        location.to_input().unwrap(),
        LocationInput::PostalCode("01001-000".to_string())
    );
}

#[test]
fn locate_accepts_negative_coordinates() {
    let cli = Cli::try_parse_from(["pdvmap", "locate", "--lat", "-26.3", "--lon", "-48.8"]).unwrap();
    let Some(Commands::Locate { location }) = cli.command else {
        panic!("expected locate command");
    };
    let LocationInput::Device(at) = location.to_input().unwrap() else {
        panic!("expected device input");
    };
    assert!((at.latitude() - -26.3).abs() < 1e-9);
    assert!((at.longitude() - -48.8).abs() < 1e-9);
}

#[test]
fn locate_rejects_out_of_range_latitude() {
    let cli = Cli::try_parse_from(["pdvmap", "locate", "--lat", "95", "--lon", "10"]).unwrap();
    let Some(Commands::Locate { location }) = cli.command else {
        panic!("expected locate command");
    };
    assert!(location.to_input().is_err());
}

#[test]
fn locate_without_location_fails_conversion() {
    let cli = Cli::try_parse_from(["pdvmap", "locate"]).unwrap();
    let Some(Commands::Locate { location }) = cli.command else {
        panic!("expected locate command");
    };
    assert!(location.to_input().is_err());
}

#[test]
fn lat_requires_lon() {
    assert!(Cli::try_parse_from(["pdvmap", "locate", "--lat", "-26.3"]).is_err());
}

#[test]
fn cep_conflicts_with_coordinates() {
    assert!(Cli::try_parse_from([
        "pdvmap", "locate", "--cep", "01001000", "--lat", "-26.3", "--lon", "-48.8"
    ])
    .is_err());
}

#[test]
fn stores_defaults_container_size() {
    let cli =
        Cli::try_parse_from(["pdvmap", "stores", "--product", "p1", "--cep", "89201000"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Stores {
            ref product,
            width: 80,
            height: 24,
            ..
        }) if product == "p1"
    ));
}
