//! Fixed EPC and EPI checklist catalogs.
//!
//! Both catalogs are `'static` data: categories and items are listed in the
//! order they are printed, and item names are the join key for answers.
//!
//! # Versioning
//!
//! The lists mirror the paper forms in use; changing them changes every
//! rendered report, so they are versioned by [`CATALOG_VERSION`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Version of the catalog contents.
pub const CATALOG_VERSION: &str = "2.0";

/// Which checklist is being filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistKind {
    /// Collective protective equipment (Equipamentos de Proteção Coletiva).
    Epc,
    /// Individual protective equipment (Equipamentos de Proteção Individual).
    Epi,
}

impl ChecklistKind {
    /// All kinds, in UI order.
    pub fn all() -> &'static [ChecklistKind] {
        &[ChecklistKind::Epc, ChecklistKind::Epi]
    }

    /// Short uppercase label (`EPC`/`EPI`), used in file names.
    pub fn short_label(&self) -> &'static str {
        match self {
            ChecklistKind::Epc => "EPC",
            ChecklistKind::Epi => "EPI",
        }
    }

    /// Plural label printed in the metadata table (`EPCs`/`EPIs`).
    pub fn plural_label(&self) -> &'static str {
        match self {
            ChecklistKind::Epc => "EPCs",
            ChecklistKind::Epi => "EPIs",
        }
    }

    /// Document title.
    pub fn title(&self) -> &'static str {
        match self {
            ChecklistKind::Epc => "Checklist - Equipamentos de Proteção Coletiva (EPCs)",
            ChecklistKind::Epi => "Checklist - Equipamentos de Proteção Individual (EPIs)",
        }
    }

    /// Catalog for this kind.
    pub fn catalog(&self) -> Catalog {
        Catalog::for_kind(*self)
    }
}

impl std::fmt::Display for ChecklistKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecklistKind::Epc => write!(f, "epc"),
            ChecklistKind::Epi => write!(f, "epi"),
        }
    }
}

impl std::str::FromStr for ChecklistKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "epc" => Ok(ChecklistKind::Epc),
            "epi" => Ok(ChecklistKind::Epi),
            _ => Err(format!("unknown checklist kind: {}", s)),
        }
    }
}

/// A named, ordered group of checklist items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Category heading.
    pub name: &'static str,
    /// Item names, in print order.
    pub items: &'static [&'static str],
}

/// The ordered categories of one checklist kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Kind this catalog belongs to.
    pub kind: ChecklistKind,
    /// Categories, in print order.
    pub categories: &'static [Category],
}

impl Catalog {
    /// Catalog for the given kind.
    pub fn for_kind(kind: ChecklistKind) -> Self {
        let categories = match kind {
            ChecklistKind::Epc => EPC_CATEGORIES,
            ChecklistKind::Epi => EPI_CATEGORIES,
        };
        Catalog { kind, categories }
    }

    /// Iterate `(category, item)` pairs in print order.
    pub fn items(&self) -> impl Iterator<Item = (&'static Category, &'static str)> {
        self.categories
            .iter()
            .flat_map(|cat| cat.items.iter().map(move |item| (cat, *item)))
    }

    /// Total number of items across all categories.
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Whether `item` is part of this catalog.
    pub fn contains(&self, item: &str) -> bool {
        self.category_of(item).is_some()
    }

    /// Category holding `item`, if any.
    pub fn category_of(&self, item: &str) -> Option<&'static Category> {
        self.categories
            .iter()
            .find(|cat| cat.items.iter().any(|i| *i == item))
    }
}

static EPC_CATEGORIES: &[Category] = &[
    Category {
        name: "Ferramentas Básicas",
        items: &[
            "ALICATE BOMBA D'ÁGUA 12\"",
            "ALICATE HIDRAULICO COMPRESSÃO COM MATRIZES",
            "ARCO DE SERRA COMUM",
            "ARCO DE SERRA ISOLADO/SERRA PARA ARCO DE SERRA",
            "CHAVE AJUSTÁVEL INGLESA BOCA 25MM",
            "CHAVE AJUSTÁVEL INGLESA BOCA 35MM",
            "CHAVE ALLE 1/8 -9/16POL SX",
            "CHAVE FENDAR 6 X 150MM",
            "CHAVE FENDAR 8 X 150MM",
            "CHAVE DE BOCA 1/4 X 3 X 4 POL",
            "JOGO CHAVE ALLEN 1/8\" A 9/16\"",
            "JOGO CHAVE FIXA 8 PCS 1/4\" A 1.1/4\"",
            "MARRETA 1,5KG C/CABO",
            "FACÃO 20 POL.",
        ],
    },
    Category {
        name: "Equipamentos de Segurança",
        items: &[
            "ATERRAMENTO PARA VEÍCULO",
            "CONJUNTO DE ATERRAMENTO RÁPIDO E TEMPORÁRIO ATÉ 34",
            "CONJUNTO DE ATERRAMENTO RÁPIDO E TEMPORÁRIO SECUNDÁRIO",
            "CONJUNTO DE ATERRAMENTO BT PARA REDE MULTIPLEX",
            "DETECTOR DE PRESENÇA DE TENSÃO POR APROX. BT / MT / AT",
            "BANQUETA ISOLADA",
            "LENÇOL ISOLANTE P/BT",
            "LUVA DE BORRACHA CLASSE 2 / LUVA COBERTURA VAQUETA",
            "LUVA DE BORRACHA CLASSE 4",
        ],
    },
    Category {
        name: "Equipamentos de Elevação",
        items: &[
            "BALDE DE LONA FUNDO DE COURO / PARA IÇAMENTO",
            "CINTA DE ELEVAÇÃO 3TON. X 20CM LARG. X 1,5MT COMP.",
            "CINTA DE ELEVAÇÃO 3TON. X 20CM LARG. X 2MT COMP.",
            "CINTA DE ELEVAÇÃO 2TON. X 20CM LARG. X 2MT COMP.",
            "CINTA TUBULAR TIPO ANEL PARA ELEVAÇÃO DE POSTA CAPA TR",
            "ROLDANA PARA ELEVAÇÃO DE MATERIAIS, COM GANCHO",
            "MOITÃO DUPLO 1500 DAN C/ 40MT DE CORDA",
            "MOSQUETÃO OVAL COMUM PARA IÇAMENTO DE MATERIAIS",
            "ROLDANA P/ LANÇAMENTO DE CABO C/ FIXAÇÃO NA CRUZETA",
        ],
    },
    Category {
        name: "Ferramentas Especializadas",
        items: &[
            "ALAVANCA AÇO SEXTAVADA, 1500 MM",
            "ALICATE VOLT AMPERÍMETRO DE 20A - 1000A",
            "BASTÃO PEGA TUDO",
            "BASTÃO PODADOR DE GALHOS C/ CABEÇOTE UNIVERSAL",
            "CABEÇOTE PARA INSTALAÇÃO DE ESPAÇADORES",
            "CATRACA PARA TENSIONAR CABO COM ESTIRANTE DE NYLON",
            "FERRAMENTA P/ APLICAÇÃO DE CONECTOR TIPO CUNHA",
            "FERRAMENTA P/ OPERAÇÃO DE CHAVE C/ CARGA 25KV / 66A LOADBUSTER",
            "VARA DE MANOBRA TELESCÓPICA 5 ESTÁGIOS C/ CABEÇOTE",
        ],
    },
    Category {
        name: "Equipamentos de Trabalho",
        items: &[
            "CAVALETE BOBINA",
            "CAVADEIRA AÇO COM CABO",
            "COLHER DE PEDREIRO 8 POL",
            "ENXADA C/CABO FERRO 1,80 MT",
            "ENXADADETA /CABO MADEIRA 1,5KG",
            "ESCADA FIBRA EXT. 5,40X9,60M",
            "ESCADA FIBRA EXT. 4,20X7.20M",
            "MOTOSSERRA SABRE 30,40,50",
            "PÁ QUADRADA GRANDE P/ JUNTAR C/ CABO DE MADEIRA EM \"Y\"",
            "VASSOURAM GARI GRANDE",
        ],
    },
    Category {
        name: "Acessórios e Materiais",
        items: &[
            "BOLSA DE LONA PARA EPI E FERRAMENTAS",
            "BOLSA DE BASTÃO PEGA TUDO",
            "BANDEIROLA",
            "CONE DE SINALIZAÇÃO GRANDE COM PINTURA FOSFORECENTE",
            "CORDA ESTÁTICA CAPA E ALMA 12MM 22KN \"LINHA DE VIDA 144 METROS",
            "CORDA PARA IÇAR FERRAMENTAS E MATERIAIS 10MM 43 METROS",
            "DEPÓSITO PARA ÁGUA 10L",
            "ENCERADO 6 X 5 M",
            "ESCOVA EM \"V\" PARA LIMPEZA DE CONDUTOR COM ENCAIXE",
            "GARRAFA TÉRMICA 12LT",
            "KIT PRIMEIROS SOCORROS",
            "LÂMINA PARA ARCO DE SERRA 24D",
            "PLACA SINALIZAÇÃO \"ATENÇÃO! NÃO OPERE ESTE EQUIPAMENTO\"",
            "PLACA SINALIZAÇÃO \"NÃO LIGAR, HOMENS NA LINHA\"",
            "PRANCHETA OFÍCIO C/ PRENDEDOR PLÁST.",
            "TRENA DE FITA FIBRA 50MT",
        ],
    },
];

static EPI_CATEGORIES: &[Category] = &[
    Category {
        name: "Proteção da Cabeça",
        items: &["Capacete de segurança classe B", "Jugular para capacete"],
    },
    Category {
        name: "Proteção dos Olhos e Face",
        items: &[
            "Óculos de segurança incolor",
            "Óculos de segurança cinza ou fumê",
            "Óculos de sobreposição (para quem usa óculos de grau)",
            "Balaclava simples",
            "Balaclava Antichamas",
            "Protetor facial contra arco elétrico",
        ],
    },
    Category {
        name: "Proteção Respiratória",
        items: &["Respirador descartável PFF1", "Respirador descartável PFF2"],
    },
    Category {
        name: "Proteção Auditiva",
        items: &[
            "Protetor auricular tipo plug (descartável)",
            "Protetor auricular tipo plug com cordão",
            "Protetor auricular tipo concha (abafador)",
        ],
    },
    Category {
        name: "Proteção do Tronco e Corpo",
        items: &[
            "Camisa de manga longa anti-chamas",
            "Calça anti-chamas",
            "Colete refletivo de alta visibilidade",
            "Colete Salva vidas",
        ],
    },
    Category {
        name: "Proteção das Mãos e Braços",
        items: &[
            "Luva de vaqueta (manuseio de materiais)",
            "Luva de raspa (solda e corte)",
            "Luva isolante classe 0 (até 1.000 V)",
            "Luva isolante classe 2 (até 17.000 V)",
            "Luva isolante classe 4 (até 36.000 V)",
            "Luva de cobertura de vaqueta (uso sobre as isolantes)",
            "Manga de raspa (proteção do braço)",
            "Manga isolante classe 2 (até 17.000 V)",
        ],
    },
    Category {
        name: "Proteção das Pernas",
        items: &[
            "Perneira de raspa (trabalho com motosserra e ferramentas de corte)",
            "Perneira contra animais peçonhentos (mata e roçada)",
        ],
    },
    Category {
        name: "Proteção dos Pés",
        items: &[
            "Botina de segurança com biqueira de aço",
            "Botina de segurança com biqueira de composite (NR 10)",
            "Bota dielétrica (classe elétrica)",
            "Bota de PVC antiderrapante (chuva, lama e herbicidas)",
        ],
    },
    Category {
        name: "Proteção Contra Quedas",
        items: &[
            "Cinturão tipo paraquedista",
            "Cinto paraquedista com talabarte",
            "Talabarte ajustável para posicionamento",
            "Linha de vida vertical com trava-quedas",
            "Trava-quedas retrátil",
            "Conectores mosquetões (trava dupla automática)",
        ],
    },
    Category {
        name: "Atividades Rurais",
        items: &["Protetor solar", "Repelente contra insetos"],
    },
    Category {
        name: "Itens Complementares",
        items: &[
            "Capacete com viseira integrada contra arco elétrico",
            "Protetor lombar (ergonomia – carga e descarga)",
            "Capa de chuva PVC (isolante e visibilidade em obras externas)",
        ],
    },
];
