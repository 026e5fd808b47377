/// A Brazilian federative unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrazilianState {
    /// Two-letter code, e.g. `SP`.
    pub code: &'static str,
    /// Full name as reported by IP-geolocation services.
    pub name: &'static str,
}

const fn state(code: &'static str, name: &'static str) -> BrazilianState {
    BrazilianState { code, name }
}

/// All 26 states plus the Federal District.
pub const STATES: [BrazilianState; 27] = [
    state("AC", "Acre"),
    state("AL", "Alagoas"),
    state("AP", "Amapá"),
    state("AM", "Amazonas"),
    state("BA", "Bahia"),
    state("CE", "Ceará"),
    state("DF", "Distrito Federal"),
    state("ES", "Espírito Santo"),
    state("GO", "Goiás"),
    state("MA", "Maranhão"),
    state("MT", "Mato Grosso"),
    state("MS", "Mato Grosso do Sul"),
    state("MG", "Minas Gerais"),
    state("PA", "Pará"),
    state("PB", "Paraíba"),
    state("PR", "Paraná"),
    state("PE", "Pernambuco"),
    state("PI", "Piauí"),
    state("RJ", "Rio de Janeiro"),
    state("RN", "Rio Grande do Norte"),
    state("RS", "Rio Grande do Sul"),
    state("RO", "Rondônia"),
    state("RR", "Roraima"),
    state("SC", "Santa Catarina"),
    state("SP", "São Paulo"),
    state("SE", "Sergipe"),
    state("TO", "Tocantins"),
];

/// Map a region name to its state code.
pub fn state_code_for_region(region: &str) -> Option<&'static str> {
    let region = region.trim();
    STATES
        .iter()
        .find(|state| state.name == region)
        .map(|state| state.code)
}

/// Check if `code` is one of the 27 state codes.
pub fn is_state_code(code: &str) -> bool {
    STATES.iter().any(|state| state.code == code)
}
