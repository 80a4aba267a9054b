use super::State;
use crate::equation_of_state::{Derivatives, HelmholtzEquation};
use crate::errors::{MeosError, MeosResult};
use crate::si::*;
use typenum::{Diff, Negate, P3, P6};

/// Property identities in terms of the reduced Helmholtz energy.
pub(crate) struct Identities<'a> {
    r: f64,
    t: f64,
    rho: f64,
    delta: f64,
    tau: f64,
    ideal_gas: &'a Derivatives,
    residual: &'a Derivatives,
}

impl Identities<'_> {
    fn rt(&self) -> f64 {
        self.r * self.t
    }

    fn compressibility(&self) -> f64 {
        1.0 + self.delta * self.residual.phi_d
    }

    fn pressure(&self) -> f64 {
        self.rho * self.rt() * self.compressibility()
    }

    fn internal_energy(&self) -> f64 {
        self.tau * (self.ideal_gas.phi_t + self.residual.phi_t)
    }

    fn enthalpy(&self) -> f64 {
        1.0 + self.internal_energy() + self.delta * self.residual.phi_d
    }

    fn entropy(&self) -> f64 {
        self.internal_energy() - self.ideal_gas.phi - self.residual.phi
    }

    fn helmholtz_energy(&self) -> f64 {
        self.ideal_gas.phi + self.residual.phi
    }

    fn gibbs_energy(&self) -> f64 {
        1.0 + self.helmholtz_energy() + self.delta * self.residual.phi_d
    }

    fn isochoric_heat_capacity(&self) -> f64 {
        -self.tau * self.tau * (self.ideal_gas.phi_tt + self.residual.phi_tt)
    }

    /// $\frac{1}{RT}\left(\frac{\partial P}{\partial\rho}\right)_T$
    fn dp_drho(&self) -> f64 {
        let (d, r) = (self.delta, self.residual);
        1.0 + 2.0 * d * r.phi_d + d * d * r.phi_dd
    }

    /// $\frac{1}{RT}\left(\frac{\partial^2 P}{\partial\rho^2}\right)_T\rho$
    fn d2p_drho2(&self) -> f64 {
        let (d, r) = (self.delta, self.residual);
        2.0 * d * r.phi_d + 4.0 * d * d * r.phi_dd + d * d * d * r.phi_ddd
    }

    /// $\frac{1}{\rho R}\left(\frac{\partial P}{\partial T}\right)_\rho$
    fn dp_dt(&self) -> f64 {
        let (d, r) = (self.delta, self.residual);
        1.0 + d * r.phi_d - d * self.tau * r.phi_dt
    }

    fn isobaric_heat_capacity(&self) -> MeosResult<f64> {
        let denominator = self.dp_drho();
        if denominator.abs() < 1e-12 {
            return Err(MeosError::CriticalSingularity(denominator));
        }
        Ok(self.isochoric_heat_capacity() + self.dp_dt().powi(2) / denominator)
    }

    /// Squared speed of sound in m²/s² for a molar weight in kg/mol.
    fn speed_of_sound_squared(&self, molar_weight: f64) -> MeosResult<f64> {
        let scale = self.rt() / molar_weight;
        let w2 = scale
            * (self.dp_drho()
                - self.dp_dt().powi(2)
                    / (self.tau * self.tau * (self.ideal_gas.phi_tt + self.residual.phi_tt)));
        if w2 >= 0.0 {
            Ok(w2)
        } else if w2 > -1e-10 * scale {
            log::warn!("speed of sound: negative radicand {w2} m²/s² set to zero");
            Ok(0.0)
        } else {
            Err(MeosError::NegativeRadicand(w2))
        }
    }

    fn ln_fugacity_coefficient(&self) -> f64 {
        let z = self.compressibility();
        self.residual.phi + self.delta * self.residual.phi_d - z.ln()
    }
}

fn molar_energy(value: f64) -> MolarEnergy {
    value * JOULE / MOL
}

fn molar_entropy(value: f64) -> MolarEntropy {
    value * JOULE / MOL / KELVIN
}

/// # State properties
impl State {
    pub(crate) fn identities(&self) -> Identities<'_> {
        Identities {
            r: self.fluid.equation().r,
            t: self.temperature.kelvin(),
            rho: self.density.mol_m3(),
            delta: self.delta,
            tau: self.tau,
            ideal_gas: &self.ideal_gas,
            residual: &self.residual,
        }
    }

    fn rt(&self) -> f64 {
        self.identities().rt()
    }

    /// Pressure and its derivative with respect to density in SI units.
    pub(crate) fn p_dpdrho(&self) -> (f64, f64) {
        let id = self.identities();
        (id.pressure(), id.rt() * id.dp_drho())
    }

    /// Pressure and its first and second derivatives with respect to density in SI units.
    pub(crate) fn p_dpdrho_d2pdrho2(&self) -> (f64, f64, f64) {
        let id = self.identities();
        (
            id.pressure(),
            id.rt() * id.dp_drho(),
            id.rt() / id.rho * id.d2p_drho2(),
        )
    }

    /// Residual molar Helmholtz energy $RT\phi^r$ in J/mol.
    pub(crate) fn residual_molar_helmholtz_energy(&self) -> f64 {
        self.rt() * self.residual.phi
    }

    /// Residual molar entropy $R\left(\tau\phi^r_\tau-\phi^r\right)$ in J/(mol K).
    pub(crate) fn residual_molar_entropy(&self) -> f64 {
        self.fluid.equation().r * (self.tau * self.residual.phi_t - self.residual.phi)
    }

    /// $g/(RT)$, used to compare roots at equal temperature and pressure.
    pub(crate) fn reduced_gibbs_energy(&self) -> f64 {
        self.identities().gibbs_energy()
    }

    /// Pressure: $p=\rho RT\left(1+\delta\phi^r_\delta\right)$
    pub fn pressure(&self) -> Pressure {
        self.identities().pressure() * PASCAL
    }

    /// Compressibility factor: $Z=\frac{p}{\rho RT}$
    pub fn compressibility(&self) -> f64 {
        self.identities().compressibility()
    }

    /// Molar internal energy: $u=RT\tau\left(\phi^0_\tau+\phi^r_\tau\right)$
    pub fn molar_internal_energy(&self) -> MolarEnergy {
        molar_energy(self.rt() * self.identities().internal_energy())
    }

    /// Molar enthalpy: $h=u+\frac{p}{\rho}$
    pub fn molar_enthalpy(&self) -> MolarEnergy {
        molar_energy(self.rt() * self.identities().enthalpy())
    }

    /// Molar entropy: $s=R\left(\tau\left(\phi^0_\tau+\phi^r_\tau\right)-\phi^0-\phi^r\right)$
    pub fn molar_entropy(&self) -> MolarEntropy {
        molar_entropy(self.fluid.equation().r * self.identities().entropy())
    }

    /// Molar Helmholtz energy: $a=RT\left(\phi^0+\phi^r\right)$
    pub fn molar_helmholtz_energy(&self) -> MolarEnergy {
        molar_energy(self.rt() * self.identities().helmholtz_energy())
    }

    /// Molar Gibbs energy: $g=h-Ts$
    pub fn molar_gibbs_energy(&self) -> MolarEnergy {
        molar_energy(self.rt() * self.identities().gibbs_energy())
    }

    /// Molar isochoric heat capacity: $c_v=\left(\frac{\partial u}{\partial T}\right)_\rho$
    pub fn molar_isochoric_heat_capacity(&self) -> MolarEntropy {
        molar_entropy(self.fluid.equation().r * self.identities().isochoric_heat_capacity())
    }

    /// Molar isobaric heat capacity: $c_p=\left(\frac{\partial h}{\partial T}\right)_p$
    ///
    /// Fails with [MeosError::CriticalSingularity] where $\left(\frac{\partial p}{\partial\rho}\right)_T$ vanishes.
    pub fn molar_isobaric_heat_capacity(&self) -> MeosResult<MolarEntropy> {
        Ok(molar_entropy(
            self.fluid.equation().r * self.identities().isobaric_heat_capacity()?,
        ))
    }

    /// Speed of sound: $w=\sqrt{\left(\frac{\partial p}{\partial\rho^{(m)}}\right)_s}$
    pub fn speed_of_sound(&self) -> MeosResult<Velocity> {
        let w2 = self
            .identities()
            .speed_of_sound_squared(self.fluid.molar_weight().kg_mol())?;
        Ok(w2.sqrt() * METER / SECOND)
    }

    /// Partial derivative of pressure w.r.t. density: $\left(\frac{\partial p}{\partial\rho}\right)_T$
    pub fn dp_drho(&self) -> PressurePerDensity {
        molar_energy(self.p_dpdrho().1)
    }

    /// Second partial derivative of pressure w.r.t. density: $\left(\frac{\partial^2 p}{\partial\rho^2}\right)_T$
    pub fn d2p_drho2(&self) -> Quantity<f64, Diff<_PressurePerDensity, _Density>> {
        molar_energy(self.p_dpdrho_d2pdrho2().2) / (MOL / METER.powi::<P3>())
    }

    /// Partial derivative of density w.r.t. pressure: $\left(\frac{\partial\rho}{\partial p}\right)_T$
    pub fn drho_dp(&self) -> Quantity<f64, Negate<_PressurePerDensity>> {
        1.0 / self.dp_drho()
    }

    /// Partial derivative of pressure w.r.t. temperature: $\left(\frac{\partial p}{\partial T}\right)_\rho$
    pub fn dp_dt(&self) -> PressurePerTemperature {
        let id = self.identities();
        id.rho * id.r * id.dp_dt() * PASCAL / KELVIN
    }

    /// Isothermal compressibility: $\kappa_T=\frac{1}{\rho}\left(\frac{\partial\rho}{\partial p}\right)_T$
    pub fn isothermal_compressibility(&self) -> Compressibility {
        let (_, dp_drho) = self.p_dpdrho();
        1.0 / (self.density.mol_m3() * dp_drho * PASCAL)
    }

    /// Isobaric expansivity: $\alpha_p=-\frac{1}{\rho}\left(\frac{\partial\rho}{\partial T}\right)_p$
    pub fn isobaric_expansivity(&self) -> ThermalExpansivity {
        let (_, dp_drho) = self.p_dpdrho();
        self.dp_dt().pa_k() / (self.density.mol_m3() * dp_drho) / KELVIN
    }

    /// Joule-Thomson coefficient: $\mu_{JT}=\left(\frac{\partial T}{\partial p}\right)_h$
    pub fn joule_thomson(&self) -> MeosResult<TemperaturePerPressure> {
        let alpha = self.isobaric_expansivity().per_k();
        let t = self.temperature.kelvin();
        let cp = self.molar_isobaric_heat_capacity()?.j_molk();
        Ok((t * alpha - 1.0) / (self.density.mol_m3() * cp) * KELVIN / PASCAL)
    }

    /// Isentropic exponent: $\kappa=\frac{\rho^{(m)}w^2}{p}$
    pub fn isentropic_exponent(&self) -> MeosResult<f64> {
        let w = self.speed_of_sound()?.m_s();
        Ok(self.mass_density().kg_m3() * w * w / self.pressure().pa())
    }

    /// Logarithm of the fugacity coefficient: $\ln\varphi=\phi^r+\delta\phi^r_\delta-\ln Z$
    pub fn ln_phi(&self) -> f64 {
        self.identities().ln_fugacity_coefficient()
    }

    /// Fugacity coefficient $\varphi$
    pub fn fugacity_coefficient(&self) -> f64 {
        self.ln_phi().exp()
    }

    /// Fugacity: $f=\varphi p$
    pub fn fugacity(&self) -> Pressure {
        self.fugacity_coefficient() * self.pressure()
    }

    /// Second virial coefficient $B(T)=\lim_{\rho\to 0}\frac{\phi^r_\delta}{\rho_c}$
    pub fn second_virial_coefficient(&self) -> MeosResult<MolarVolume> {
        let equation = self.fluid.equation();
        let (b, _) = equation.zero_density_limit(self.tau)?;
        Ok(b / equation.rhoc * METER.powi::<P3>() / MOL)
    }

    /// Third virial coefficient $C(T)=\lim_{\rho\to 0}\frac{\phi^r_{\delta\delta}}{\rho_c^2}$
    pub fn third_virial_coefficient(&self) -> MeosResult<SquaredMolarVolume> {
        let equation = self.fluid.equation();
        let (_, c) = equation.zero_density_limit(self.tau)?;
        Ok(c / equation.rhoc.powi(2) * METER.powi::<P6>() / (MOL * MOL))
    }

    /// All basic properties at once.
    pub fn properties(&self) -> MeosResult<PropertyBag> {
        PropertyBag::from_identities(&self.identities(), self.fluid.molar_weight().kg_mol())
    }
}

/// # Mass specific state properties
impl State {
    /// Mass density $\rho^{(m)}=M\rho$
    pub fn mass_density(&self) -> MassDensity {
        self.density * self.fluid.molar_weight()
    }

    /// Specific internal energy: $u^{(m)}=\frac{u}{M}$
    pub fn specific_internal_energy(&self) -> SpecificEnergy {
        self.molar_internal_energy() / self.fluid.molar_weight()
    }

    /// Specific enthalpy: $h^{(m)}=\frac{h}{M}$
    pub fn specific_enthalpy(&self) -> SpecificEnergy {
        self.molar_enthalpy() / self.fluid.molar_weight()
    }

    /// Specific entropy: $s^{(m)}=\frac{s}{M}$
    pub fn specific_entropy(&self) -> SpecificEntropy {
        self.molar_entropy() / self.fluid.molar_weight()
    }

    /// Specific Helmholtz energy: $a^{(m)}=\frac{a}{M}$
    pub fn specific_helmholtz_energy(&self) -> SpecificEnergy {
        self.molar_helmholtz_energy() / self.fluid.molar_weight()
    }

    /// Specific Gibbs energy: $g^{(m)}=\frac{g}{M}$
    pub fn specific_gibbs_energy(&self) -> SpecificEnergy {
        self.molar_gibbs_energy() / self.fluid.molar_weight()
    }

    /// Specific isochoric heat capacity: $c_v^{(m)}=\frac{c_v}{M}$
    pub fn specific_isochoric_heat_capacity(&self) -> SpecificEntropy {
        self.molar_isochoric_heat_capacity() / self.fluid.molar_weight()
    }

    /// Specific isobaric heat capacity: $c_p^{(m)}=\frac{c_p}{M}$
    pub fn specific_isobaric_heat_capacity(&self) -> MeosResult<SpecificEntropy> {
        Ok(self.molar_isobaric_heat_capacity()? / self.fluid.molar_weight())
    }
}

/// # Transport properties
impl State {
    /// Shear viscosity $\eta$ from the selected viscosity model.
    pub fn viscosity(&self) -> MeosResult<Viscosity> {
        let model = self.fluid.viscosity_model().ok_or_else(|| {
            MeosError::Configuration(format!("no viscosity model for {}", self.fluid.name()))
        })?;
        Ok(model.evaluate(self)? * PASCAL * SECOND)
    }

    /// Viscosity of the dilute gas at the temperature of the state.
    pub fn dilute_viscosity(&self) -> MeosResult<Viscosity> {
        match self.fluid.viscosity_model() {
            Some(crate::transport::TransportModel::Correlation(c)) => Ok(c.dilute_gas(
                self.temperature.kelvin(),
                self.fluid.molar_weight().g_mol(),
            ) * PASCAL
                * SECOND),
            _ => Err(MeosError::Configuration(format!(
                "the dilute gas viscosity of {} requires a viscosity correlation",
                self.fluid.name()
            ))),
        }
    }

    /// Thermal conductivity $\lambda$ from the selected model.
    pub fn thermal_conductivity(&self) -> MeosResult<ThermalConductivity> {
        let model = self.fluid.thermal_conductivity_model().ok_or_else(|| {
            MeosError::Configuration(format!(
                "no thermal conductivity model for {}",
                self.fluid.name()
            ))
        })?;
        Ok(model.evaluate(self)? * WATT / METER / KELVIN)
    }

    /// Kinematic viscosity $\nu=\frac{\eta}{\rho^{(m)}}$
    pub fn kinematic_viscosity(&self) -> MeosResult<Diffusivity> {
        Ok(self.viscosity()? / self.mass_density())
    }

    /// Thermal diffusivity $a=\frac{\lambda}{\rho^{(m)}c_p^{(m)}}$
    pub fn thermal_diffusivity(&self) -> MeosResult<Diffusivity> {
        Ok(self.thermal_conductivity()?
            / (self.mass_density() * self.specific_isobaric_heat_capacity()?))
    }

    /// Prandtl number $Pr=\frac{c_p^{(m)}\eta}{\lambda}$
    pub fn prandtl_number(&self) -> MeosResult<f64> {
        Ok((self.specific_isobaric_heat_capacity()? * self.viscosity()?
            / self.thermal_conductivity()?)
        .into_value())
    }
}

/// Basic properties of a single phase point, derived from the
/// Helmholtz energy derivatives in one pass.
#[derive(Clone, Copy, Debug)]
pub struct PropertyBag {
    pub temperature: Temperature,
    pub density: Density,
    pub pressure: Pressure,
    pub compressibility: f64,
    pub molar_internal_energy: MolarEnergy,
    pub molar_enthalpy: MolarEnergy,
    pub molar_entropy: MolarEntropy,
    pub molar_helmholtz_energy: MolarEnergy,
    pub molar_gibbs_energy: MolarEnergy,
    pub molar_isochoric_heat_capacity: MolarEntropy,
    pub molar_isobaric_heat_capacity: MolarEntropy,
    pub speed_of_sound: Velocity,
}

impl PropertyBag {
    /// Evaluate the equation at the given temperature and density.
    pub fn new(
        equation: &HelmholtzEquation,
        molar_weight: MolarWeight,
        temperature: Temperature,
        density: Density,
    ) -> MeosResult<Self> {
        let (t, rho) = (temperature.kelvin(), density.mol_m3());
        let (delta, tau) = equation.reduce(t, rho);
        let ideal_gas = equation.phi0(delta, tau)?;
        let residual = equation.phir(delta, tau)?;
        let identities = Identities {
            r: equation.r,
            t,
            rho,
            delta,
            tau,
            ideal_gas: &ideal_gas,
            residual: &residual,
        };
        Self::from_identities(&identities, molar_weight.kg_mol())
    }

    fn from_identities(id: &Identities, molar_weight: f64) -> MeosResult<Self> {
        let rt = id.rt();
        Ok(Self {
            temperature: id.t * KELVIN,
            density: id.rho * MOL / METER.powi::<P3>(),
            pressure: id.pressure() * PASCAL,
            compressibility: id.compressibility(),
            molar_internal_energy: molar_energy(rt * id.internal_energy()),
            molar_enthalpy: molar_energy(rt * id.enthalpy()),
            molar_entropy: molar_entropy(id.r * id.entropy()),
            molar_helmholtz_energy: molar_energy(rt * id.helmholtz_energy()),
            molar_gibbs_energy: molar_energy(rt * id.gibbs_energy()),
            molar_isochoric_heat_capacity: molar_entropy(id.r * id.isochoric_heat_capacity()),
            molar_isobaric_heat_capacity: molar_entropy(id.r * id.isobaric_heat_capacity()?),
            speed_of_sound: id.speed_of_sound_squared(molar_weight)?.sqrt() * METER / SECOND,
        })
    }
}
